//! Audio clocking newtypes.
//!
//! - `SysclkHz`: controller system clock target where `0` means "unset"

use core::num::NonZeroU32;

// ── SysclkHz ─────────────────────────────────────────────────────────────────

/// Target system clock for the controller DAI, in Hz.
///
/// Wraps the raw `codec-clock-rate` value. `0` is a valid value that means
/// "no rate configured": session setup must skip rate programming rather
/// than attempt to program a 0 Hz clock.
///
/// Typical values on the reference board:
/// - 24 576 000 Hz: Y4 oscillator supplied to the controller (48 kHz family)
/// - 24 000 000 Hz: controller-generated clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SysclkHz(u32);

impl SysclkHz {
    /// No rate configured.
    pub const UNSET: Self = Self(0);

    /// Wrap a raw rate. `0` yields [`SysclkHz::UNSET`].
    #[must_use]
    pub const fn new(hz: u32) -> Self {
        Self(hz)
    }

    /// `true` when no rate is configured.
    #[must_use]
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }

    /// The configured rate, or `None` when unset.
    #[must_use]
    pub const fn get(self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.0)
    }

    /// The raw value, `0` when unset.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for SysclkHz {
    fn from(hz: u32) -> Self {
        Self::new(hz)
    }
}

impl core::fmt::Display for SysclkHz {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.get() {
            Some(hz) => write!(f, "{hz} Hz"),
            None => write!(f, "unset"),
        }
    }
}
