//! NUL BBB machine driver
//!
//! Binds the BeagleBone McASP controller to the codecs on the NUL BBB audio
//! cape. The driver reads the link topology out of the device tree, picks
//! the frame format for the board revision, gates the optional master clock
//! around playback sessions and registers one sound card with the streaming
//! engine.
//!
//! # Architecture
//!
//! ```text
//! driver::probe
//!   ├─ variant    compatible tag → LinkVariant (frame polarity)
//!   ├─ topology   device tree → LinkDescriptor (controller, codecs, sysclk)
//!   ├─ card       LinkDescriptor + ClockGuard → Card → CardRegistry
//!   └─ session    StreamOps hooks: open / parameters / close
//! ```
//!
//! Every external collaborator is a trait from the `platform` crate, so the
//! whole driver runs on the host against `platform::mocks`.
//!
//! # Features
//!
//! - `std`: `std::error::Error` for [`Error`]
//! - `defmt`: `defmt::Format` derives on public enums
//!
//! # Example
//!
//! ```no_run
//! use machine::{probe, Error};
//! use platform::mocks::{MockClockProvider, MockDeviceTree, MockRegistry};
//!
//! let node = MockDeviceTree::new().with_compatible("nulbbb,audio");
//! let mut clocks = MockClockProvider::new();
//! let mut registry = MockRegistry::new();
//! match probe(&node, &mut clocks, &mut registry) {
//!     Ok(_card) => {}
//!     Err(e) if e.is_defer_probe() => {}
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), Error>(())
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unreachable)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod card;
pub mod clock_guard;
pub mod config;
pub mod driver;
pub mod error;
pub mod session;
pub mod topology;
pub mod variant;

pub use card::Card;
pub use clock_guard::ClockGuard;
pub use driver::{of_match, probe, remove, OfMatch, OF_MATCH_TABLE};
pub use error::Error;
pub use session::SessionState;
pub use topology::{resolve_link, CardName, CodecBinding, DaiName, LinkDescriptor, TopologyResolver};
pub use variant::{select_variant, BoardCompatible, LinkVariant};
