//! Attach and detach
//!
//! [`probe`] turns one matched description node into a registered [`Card`];
//! [`remove`] takes it down again. Attach is all-or-nothing: on any error
//! the partially built state is dropped before returning and nothing stays
//! registered.
//!
//! ```text
//! compatible ─► variant ─► link (controller, codecs, rate) ─► model
//!                                                              │
//!          register ◄── build ◄── mclk (absent ok, defer aborts) ◄┘
//! ```

use platform::{CardRegistry, ClockError, ClockProvider, HardwareDescription, SoundCard};

use crate::card::Card;
use crate::config::{DRIVER_NAME, MCLK_NAME, PREFIX};
use crate::topology::TopologyResolver;
use crate::variant::BoardCompatible;
use crate::Error;

/// One match-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfMatch {
    /// `compatible` string
    pub compatible: &'static str,
    /// Board the string identifies
    pub board: BoardCompatible,
}

/// Compatible strings this driver binds to, in priority order.
pub const OF_MATCH_TABLE: [OfMatch; 3] = [
    OfMatch {
        compatible: BoardCompatible::Audio.tag(),
        board: BoardCompatible::Audio,
    },
    OfMatch {
        compatible: BoardCompatible::AudioPurple.tag(),
        board: BoardCompatible::AudioPurple,
    },
    OfMatch {
        compatible: BoardCompatible::AudioYellow.tag(),
        board: BoardCompatible::AudioYellow,
    },
];

/// Match `node` against [`OF_MATCH_TABLE`].
///
/// # Errors
///
/// [`Error::UnsupportedBoardVariant`] when the node has no `compatible` or
/// it is not in the table.
pub fn of_match<H: HardwareDescription>(node: &H) -> Result<BoardCompatible, Error> {
    let compatible = node.compatible().ok_or(Error::UnsupportedBoardVariant)?;
    OF_MATCH_TABLE
        .iter()
        .find(|m| m.compatible == compatible)
        .map(|m| m.board)
        .ok_or(Error::UnsupportedBoardVariant)
}

/// Look up the optional master clock.
///
/// Only a deferred provider is an error; any other failure means the board
/// runs without a gateable clock.
fn lookup_mclk<P: ClockProvider>(clocks: &mut P) -> Result<Option<P::Clock>, Error> {
    match clocks.get(MCLK_NAME) {
        Ok(clock) => Ok(Some(clock)),
        Err(ClockError::DeferProbe) => {
            tracing::debug!("`{}` provider not ready, deferring probe", MCLK_NAME);
            Err(Error::DeferProbe)
        }
        Err(e) => {
            tracing::debug!("no `{}` ({}), running without master clock", MCLK_NAME, e);
            Ok(None)
        }
    }
}

/// Attach the driver to `node`.
///
/// Resolves the link, looks up the master clock through `clocks`, builds the
/// card and registers it with `registry`. The returned card must be kept
/// alive for as long as the device is attached and handed to [`remove`] at
/// detach.
///
/// # Errors
///
/// Any resolution error, [`Error::DeferProbe`] when the clock provider is
/// not ready, or [`Error::CardRegistrationFailed`].
pub fn probe<H, P, R>(node: &H, clocks: &mut P, registry: &mut R) -> Result<Card<P::Clock>, Error>
where
    H: HardwareDescription,
    P: ClockProvider,
    R: CardRegistry,
{
    let board = of_match(node)?;
    let variant = board.variant();

    let resolver = TopologyResolver::new(node, PREFIX);
    let link = resolver.resolve_link(variant)?;
    let name = resolver.card_name()?;
    let mclk = lookup_mclk(clocks)?;

    let sysclk = link.sysclk();
    let card = Card::build(name, link, mclk, sysclk);

    if let Err(e) = card.register(registry) {
        tracing::error!("{}: {}", DRIVER_NAME, e);
        return Err(e);
    }
    tracing::info!(
        "{}: registered card `{}` ({}, {} codecs)",
        DRIVER_NAME,
        card.name(),
        board.tag(),
        card.link().codecs().len()
    );
    Ok(card)
}

/// Detach: unregister `card` and drop it, releasing the master clock if a
/// session left it enabled.
pub fn remove<C, R>(card: Card<C>, registry: &mut R)
where
    C: platform::Clock,
    R: CardRegistry,
{
    registry.unregister_card(card.name());
    tracing::debug!("{}: card `{}` removed", DRIVER_NAME, card.name());
}
