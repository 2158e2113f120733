//! Clock-control abstraction
//!
//! Mirrors the consumer side of a clock framework: look a clock up by its
//! connection name, then prepare/enable and disable/unprepare it. Frequency
//! programming is out of scope here; rates are negotiated through the DAI.

/// Clock subsystem failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// No clock with the requested name is wired to this device.
    NotFound,
    /// The clock provider is not ready yet; retry the attach later.
    DeferProbe,
    /// The provider refused or failed the operation.
    Failed,
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "clock not found"),
            Self::DeferProbe => write!(f, "clock provider not ready, probe deferred"),
            Self::Failed => write!(f, "clock operation failed"),
        }
    }
}

/// A single gateable clock handle.
pub trait Clock {
    /// Prepare and enable the clock. After `Ok(())` the clock is running.
    fn prepare_enable(&mut self) -> Result<(), ClockError>;

    /// Disable and unprepare the clock.
    ///
    /// Teardown path: implementations must not fail the caller.
    fn disable_unprepare(&mut self);
}

/// Looks up clocks by connection name for one device.
pub trait ClockProvider {
    /// Concrete clock handle type.
    type Clock: Clock;

    /// Get the clock named `name`.
    ///
    /// # Errors
    ///
    /// [`ClockError::NotFound`] when the device has no such clock,
    /// [`ClockError::DeferProbe`] when its provider has not registered yet.
    fn get(&mut self, name: &str) -> Result<Self::Clock, ClockError>;
}
