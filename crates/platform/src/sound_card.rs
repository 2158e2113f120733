//! Streaming-engine boundary
//!
//! The engine that moves PCM frames is external. It sees a machine driver
//! through two seams:
//!
//! - [`CardRegistry`]: the card is offered once at attach time and
//!   withdrawn at detach.
//! - [`StreamOps`]: per-session hooks the engine invokes synchronously and
//!   serially around each playback stream.

use crate::dai::CpuDai;

/// Maximum stored length of a registration failure cause, in bytes.
pub const REGISTRATION_CAUSE_LEN: usize = 128;

/// Appended to a cause that had to be cut.
pub const TRUNCATION_MARK: char = '…';

/// Identity of one playback stream instance, assigned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionId(pub u32);

/// Stream parameters negotiated before data flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwParams {
    /// Frame rate in Hz
    pub rate_hz: u32,
    /// Channel count
    pub channels: u8,
    /// Bits per sample
    pub sample_bits: u8,
}

impl Default for HwParams {
    fn default() -> Self {
        Self {
            rate_hz: 48_000,
            channels: 2,
            sample_bits: 16,
        }
    }
}

/// Engine-side state of a running session, as seen by a hook.
pub trait PcmRuntime {
    /// Controller DAI type
    type CpuDai: CpuDai;

    /// Session identity
    fn session(&self) -> SessionId;

    /// The controller DAI this session streams through.
    fn cpu_dai(&mut self) -> &mut Self::CpuDai;
}

/// Session hooks consumed by the streaming engine.
pub trait StreamOps {
    /// Error reported back to the engine.
    type Error;

    /// Called before the stream is opened.
    fn on_session_open<R: PcmRuntime>(&mut self, runtime: &mut R) -> Result<(), Self::Error>;

    /// Called once parameters are known, before data flows.
    fn on_parameters_negotiated<R: PcmRuntime>(
        &mut self,
        runtime: &mut R,
        params: &HwParams,
    ) -> Result<(), Self::Error>;

    /// Called when the stream ends for any reason. Never fails.
    fn on_session_close<R: PcmRuntime>(&mut self, runtime: &mut R);
}

/// Read-only view of a card offered for registration.
pub trait SoundCard {
    /// User-visible card name.
    fn name(&self) -> &str;

    /// Name of the driver that built the card.
    fn driver_name(&self) -> &str;

    /// Number of audio links on the card.
    fn num_links(&self) -> usize;
}

/// Registration rejected by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationError {
    cause: heapless::String<REGISTRATION_CAUSE_LEN>,
}

impl RegistrationError {
    /// Build an error from a cause string.
    ///
    /// A cause longer than [`REGISTRATION_CAUSE_LEN`] bytes is cut on a
    /// character boundary and ends in [`TRUNCATION_MARK`].
    pub fn new(cause: &str) -> Self {
        let mut stored = heapless::String::new();
        if stored.push_str(cause).is_ok() {
            return Self { cause: stored };
        }

        let room = REGISTRATION_CAUSE_LEN.saturating_sub(TRUNCATION_MARK.len_utf8());
        for c in cause.chars() {
            if stored.len().saturating_add(c.len_utf8()) > room {
                break;
            }
            if stored.push(c).is_err() {
                break;
            }
        }
        let _ = stored.push(TRUNCATION_MARK);
        Self { cause: stored }
    }

    /// The engine's reason for rejecting the card.
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistrationError {}

impl core::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "card registration failed: {}", self.cause)
    }
}

/// Card registration with the streaming engine.
pub trait CardRegistry {
    /// Offer a fully built card. After `Ok(())` the engine may start
    /// sessions on it.
    fn register_card<C: SoundCard>(&mut self, card: &C) -> Result<(), RegistrationError>;

    /// Withdraw a previously registered card by name.
    fn unregister_card(&mut self, name: &str);
}
