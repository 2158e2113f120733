//! Driver error taxonomy
//!
//! Resolution errors are fatal to attach and reach the attach caller
//! unchanged; no partial card is ever registered. [`Error::DeferProbe`] is
//! not a failure but a request to retry attach once the clock provider
//! exists. Session errors fail one playback attempt and leave the card
//! registered.

use platform::{ClockError, DaiError};

/// Machine driver errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The controller reference is missing or does not resolve.
    MissingController,
    /// The codec list is missing or empty.
    NoCodecsSpecified,
    /// More codecs than a link can hold.
    TooManyCodecs {
        /// Codecs listed in the description
        count: usize,
    },
    /// Codec entry `index` does not resolve to a node.
    CodecResolutionFailed {
        /// Position in the codec list
        index: usize,
    },
    /// The codec name list is missing or its length differs from the codec list.
    CodecNameMismatch {
        /// Codecs listed
        codecs: usize,
        /// Names listed
        names: usize,
    },
    /// A codec DAI name or property key exceeds its buffer.
    NameTooLong,
    /// The clock rate property is present but not an unsigned 32-bit value.
    InvalidClockRate,
    /// The card name property is present but not a string.
    InvalidCardName,
    /// The `compatible` tag is not in the match table.
    UnsupportedBoardVariant,
    /// The master clock could not be enabled.
    ClockEnableFailed(ClockError),
    /// The controller rejected the system clock configuration.
    SysclkConfigFailed(DaiError),
    /// A session is already open on this card.
    SessionBusy,
    /// Parameters negotiated without an open session.
    NoActiveSession,
    /// The streaming engine rejected the card.
    CardRegistrationFailed {
        /// Engine-supplied reason
        cause: heapless::String<{ platform::sound_card::REGISTRATION_CAUSE_LEN }>,
    },
    /// The clock provider is not ready; retry attach later.
    DeferProbe,
}

impl Error {
    /// `true` for the retry signal, which must not be reported as a failure.
    pub fn is_defer_probe(&self) -> bool {
        matches!(self, Self::DeferProbe)
    }
}

impl From<platform::RegistrationError> for Error {
    fn from(err: platform::RegistrationError) -> Self {
        let mut cause = heapless::String::new();
        for c in err.cause().chars() {
            if cause.push(c).is_err() {
                break;
            }
        }
        Self::CardRegistrationFailed { cause }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingController => write!(f, "controller reference missing"),
            Self::NoCodecsSpecified => write!(f, "no codecs specified"),
            Self::TooManyCodecs { count } => {
                write!(f, "{count} codecs listed, at most {} supported", crate::config::MAX_CODECS)
            }
            Self::CodecResolutionFailed { index } => write!(f, "failed parsing codec #{index}"),
            Self::CodecNameMismatch { codecs, names } => {
                write!(f, "{codecs} codecs but {names} codec names")
            }
            Self::NameTooLong => write!(f, "name exceeds buffer"),
            Self::InvalidClockRate => write!(f, "invalid codec clock rate"),
            Self::InvalidCardName => write!(f, "invalid card name"),
            Self::UnsupportedBoardVariant => write!(f, "unsupported board variant"),
            Self::ClockEnableFailed(e) => write!(f, "master clock enable failed: {e}"),
            Self::SysclkConfigFailed(e) => write!(f, "sysclk configuration failed: {e}"),
            Self::SessionBusy => write!(f, "a session is already open"),
            Self::NoActiveSession => write!(f, "no open session"),
            Self::CardRegistrationFailed { cause } => {
                write!(f, "card registration failed: {cause}")
            }
            Self::DeferProbe => write!(f, "probe deferred"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use platform::RegistrationError;

    #[test]
    fn only_defer_probe_is_retry_signal() {
        assert!(Error::DeferProbe.is_defer_probe());
        assert!(!Error::MissingController.is_defer_probe());
        assert!(!Error::ClockEnableFailed(ClockError::DeferProbe).is_defer_probe());
    }

    #[test]
    fn registration_cause_is_carried_unchanged() {
        let err = Error::from(RegistrationError::new("duplicate card"));
        match err {
            Error::CardRegistrationFailed { cause } => assert_eq!(cause.as_str(), "duplicate card"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn overlong_registration_cause_keeps_truncation_mark() {
        let long = "engine rejected card: ".repeat(10);
        match Error::from(RegistrationError::new(&long)) {
            Error::CardRegistrationFailed { cause } => {
                assert!(cause.starts_with("engine rejected card: "));
                assert!(cause.ends_with(platform::TRUNCATION_MARK));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn display_names_the_codec_index() {
        let msg = Error::CodecResolutionFailed { index: 3 }.to_string();
        assert!(msg.contains("#3"));
    }
}
