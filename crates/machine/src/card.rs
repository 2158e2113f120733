//! Card model
//!
//! A [`Card`] is the assembled, owned result of attach: the resolved link,
//! the master clock guard, the configured sysclk and the session tracker.
//! It is held by the attach caller for the lifetime of the device and
//! offered to the streaming engine through [`platform::CardRegistry`].

use platform::{CardRegistry, Clock, SoundCard, SysclkHz};

use crate::clock_guard::ClockGuard;
use crate::config::{DEFAULT_CARD_NAME, DRIVER_NAME};
use crate::session::{SessionState, SessionTracker};
use crate::topology::{truncated_card_name, CardName, LinkDescriptor};
use crate::Error;

/// Assembled sound card.
#[derive(Debug)]
pub struct Card<C: Clock> {
    name: CardName,
    link: LinkDescriptor,
    sysclk: SysclkHz,
    pub(crate) clock: ClockGuard<C>,
    pub(crate) session: SessionTracker,
}

impl<C: Clock> Card<C> {
    /// Assemble a card from a resolved link.
    ///
    /// `name` falls back to [`DEFAULT_CARD_NAME`]. `clock` is the optional
    /// master clock; `sysclk` is the rate programmed into the controller when
    /// a session negotiates its parameters.
    pub fn build(
        name: Option<CardName>,
        link: LinkDescriptor,
        clock: Option<C>,
        sysclk: SysclkHz,
    ) -> Self {
        let name = name.unwrap_or_else(|| truncated_card_name(DEFAULT_CARD_NAME));
        Self {
            name,
            link,
            sysclk,
            clock: ClockGuard::new(clock),
            session: SessionTracker::new(),
        }
    }

    /// Offer the card to the streaming engine.
    ///
    /// # Errors
    ///
    /// [`Error::CardRegistrationFailed`] with the engine's cause. Not retried.
    pub fn register<R: CardRegistry>(&self, registry: &mut R) -> Result<(), Error> {
        registry.register_card(self).map_err(Error::from)
    }

    /// The card's only link.
    pub fn link(&self) -> &LinkDescriptor {
        &self.link
    }

    /// All links on the card.
    pub fn links(&self) -> &[LinkDescriptor] {
        core::slice::from_ref(&self.link)
    }

    /// Configured controller sysclk.
    pub fn sysclk(&self) -> SysclkHz {
        self.sysclk
    }

    /// `true` when the board has a gateable master clock.
    pub fn has_mclk(&self) -> bool {
        self.clock.is_present()
    }

    /// `true` while a session holds the master clock enabled.
    pub fn mclk_enabled(&self) -> bool {
        self.clock.is_enabled()
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }
}

impl<C: Clock> SoundCard for Card<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn driver_name(&self) -> &str {
        DRIVER_NAME
    }

    fn num_links(&self) -> usize {
        self.links().len()
    }
}
