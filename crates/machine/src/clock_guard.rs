//! Master clock guard
//!
//! Owns the optional `mclk` handle and gates it around playback sessions.
//! Boards without a gateable master clock (free-running oscillator) get an
//! empty guard whose operations are no-ops.
//!
//! ```text
//! [Released] --acquire()--> [Enabled] --release()--> [Released]
//!      ↑                                                  |
//!      +------------- drop() while Enabled ---------------+
//! ```
//!
//! The guard does not reference-count: one card serves one stream, so
//! `acquire`/`release` are strictly paired by the session hooks. `release`
//! only disables a clock this guard enabled, so an unmatched `release` on an
//! abort path cannot unbalance the clock framework.

use platform::Clock;

use crate::Error;

/// Optional master clock with enable-state tracking.
#[derive(Debug)]
pub struct ClockGuard<C: Clock> {
    clock: Option<C>,
    enabled: bool,
}

impl<C: Clock> ClockGuard<C> {
    /// Guard over `clock`, initially released.
    pub fn new(clock: Option<C>) -> Self {
        Self {
            clock,
            enabled: false,
        }
    }

    /// Guard with no clock; every operation is a no-op.
    pub fn absent() -> Self {
        Self::new(None)
    }

    /// `true` when a clock handle is present.
    pub fn is_present(&self) -> bool {
        self.clock.is_some()
    }

    /// `true` while the clock is enabled by this guard.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Prepare and enable the clock, if present.
    ///
    /// Acquiring an already enabled guard is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::ClockEnableFailed`] carrying the clock framework's error.
    pub fn acquire(&mut self) -> Result<(), Error> {
        let Some(clock) = self.clock.as_mut() else {
            return Ok(());
        };
        if self.enabled {
            return Ok(());
        }
        clock.prepare_enable().map_err(Error::ClockEnableFailed)?;
        self.enabled = true;
        Ok(())
    }

    /// Disable and unprepare the clock, if this guard enabled it. Never fails.
    pub fn release(&mut self) {
        if let Some(clock) = self.clock.as_mut() {
            if self.enabled {
                clock.disable_unprepare();
                self.enabled = false;
            }
        }
    }
}

impl<C: Clock> Drop for ClockGuard<C> {
    fn drop(&mut self) {
        if self.enabled {
            tracing::warn!("master clock still enabled at teardown, disabling");
        }
        self.release();
    }
}
