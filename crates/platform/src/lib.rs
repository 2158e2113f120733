//! Hardware Abstraction Layer (HAL) for the NUL BBB audio cape
//!
//! This crate provides trait-based abstractions for every collaborator the
//! machine driver talks to, enabling development and testing without the
//! board, the kernel clock framework, or a real streaming engine.
//!
//! # Architecture Layers
//!
//! ```text
//! Attach routine (caller)
//!         ↓
//! Machine driver (machine crate: topology, clock guard, session hooks)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Device tree / clock framework / streaming engine
//! ```
//!
//! # Abstractions
//!
//! - [`HardwareDescription`] - Read-only device-tree node queries
//! - [`ClockProvider`] / [`Clock`] - Master clock lookup and gating
//! - [`CpuDai`] - Controller system clock configuration
//! - [`CardRegistry`] / [`StreamOps`] - Streaming engine boundary
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable `defmt::Format` derives on all platform types
//!
//! # Example
//!
//! ```no_run
//! use platform::{Clock, ClockError};
//!
//! fn start<C: Clock>(mclk: &mut C) -> Result<(), ClockError> {
//!     mclk.prepare_enable()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio_types;
pub mod clock;
pub mod dai;
pub mod device_tree;
pub mod mocks;
pub mod sound_card;

pub use audio_types::SysclkHz;
pub use clock::{Clock, ClockError, ClockProvider};
pub use dai::{ClockDirection, ClockInversion, CpuDai, DaiClocking, DaiError, DaiFormat, DaiProtocol};
pub use device_tree::{HardwareDescription, NodeRef, PropertyError};
pub use sound_card::{
    CardRegistry, HwParams, PcmRuntime, RegistrationError, SessionId, SoundCard, StreamOps,
    TRUNCATION_MARK,
};
