//! Board variant selection
//!
//! Two cape revisions exist. They differ only in frame-sync polarity: the
//! yellow board routes LRCLK through an inverter, so its link must run with
//! an inverted frame. Everything else about the link is identical.
//!
//! | `compatible`          | Variant         | Format (I2S, codec consumer) |
//! |-----------------------|-----------------|------------------------------|
//! | `nulbbb,audio`        | `Standard`      | normal bit, normal frame     |
//! | `nulbbb,audio-purple` | `Standard`      | normal bit, normal frame     |
//! | `nulbbb,audio-yellow` | `InvertedFrame` | normal bit, inverted frame   |

use platform::{ClockInversion, DaiClocking, DaiFormat, DaiProtocol};

use crate::Error;

/// Compatible tags this driver binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardCompatible {
    /// `nulbbb,audio` (original board, same wiring as purple)
    Audio,
    /// `nulbbb,audio-purple`
    AudioPurple,
    /// `nulbbb,audio-yellow`
    AudioYellow,
}

impl BoardCompatible {
    /// All supported tags, in match-table order.
    pub const ALL: [Self; 3] = [Self::Audio, Self::AudioPurple, Self::AudioYellow];

    /// The device-tree `compatible` string.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Audio => "nulbbb,audio",
            Self::AudioPurple => "nulbbb,audio-purple",
            Self::AudioYellow => "nulbbb,audio-yellow",
        }
    }

    /// Look up a `compatible` string.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedBoardVariant`] for any tag outside the table.
    pub fn from_tag(tag: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.tag() == tag)
            .ok_or(Error::UnsupportedBoardVariant)
    }

    /// Link variant wired on this board.
    pub const fn variant(self) -> LinkVariant {
        match self {
            Self::Audio | Self::AudioPurple => LinkVariant::Standard,
            Self::AudioYellow => LinkVariant::InvertedFrame,
        }
    }
}

/// Frame-format variant of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkVariant {
    /// Normal bit clock, normal frame sync
    Standard,
    /// Normal bit clock, inverted frame sync
    InvertedFrame,
}

impl LinkVariant {
    /// Full DAI format for this variant. The controller always provides bit
    /// clock and frame sync; codecs consume both.
    pub const fn dai_format(self) -> DaiFormat {
        let inversion = match self {
            Self::Standard => ClockInversion::NormalBitNormalFrame,
            Self::InvertedFrame => ClockInversion::NormalBitInvertedFrame,
        };
        DaiFormat {
            protocol: DaiProtocol::I2s,
            clocking: DaiClocking::CodecConsumer,
            inversion,
        }
    }
}

/// Map a `compatible` tag to the link variant it selects.
///
/// # Errors
///
/// [`Error::UnsupportedBoardVariant`] for any tag outside the table.
pub fn select_variant(tag: &str) -> Result<LinkVariant, Error> {
    BoardCompatible::from_tag(tag).map(BoardCompatible::variant)
}
