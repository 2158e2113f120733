//! Driver configuration and constants
//!
//! Every device-tree key, name and limit used by the driver is defined here.
//! Other modules reference these constants rather than hardcoding values.
//!
//! # Device-tree binding
//!
//! ```text
//! sound {
//!     compatible = "nulbbb,audio-yellow";
//!     nulbbb,model = "NUL BBB";                     (optional)
//!     nulbbb,mcasp-controller = <&mcasp0>;
//!     nulbbb,audio-codec = <&tlv320>, <&pcm5102>;   (count >= 1)
//!     nulbbb,codec-name = "tlv320-hifi", "pcm5102-hifi";
//!     nulbbb,codec-clock-rate = <24576000>;         (0 = unset)
//!     clocks = <&mclk_osc>;
//!     clock-names = "mclk";
//! };
//! ```

use platform::ClockDirection;

/// Vendor prefix of every driver-specific property.
pub const PREFIX: &str = "nulbbb,";

/// Controller (McASP) reference property, without prefix.
pub const PROP_CONTROLLER: &str = "mcasp-controller";

/// Codec reference-list property, without prefix.
pub const PROP_CODECS: &str = "audio-codec";

/// Codec DAI name list property, without prefix.
pub const PROP_CODEC_NAMES: &str = "codec-name";

/// Controller system clock rate property, without prefix.
pub const PROP_CLOCK_RATE: &str = "codec-clock-rate";

/// Card display name property, without prefix.
pub const PROP_MODEL: &str = "model";

/// Connection name of the optional master clock.
pub const MCLK_NAME: &str = "mclk";

/// Platform driver name.
pub const DRIVER_NAME: &str = "nul_bbb";

/// Name of the single audio link.
pub const LINK_NAME: &str = "NUL BBB";

/// Stream name of the single audio link.
pub const STREAM_NAME: &str = "Playback";

/// Card name used when the description has no `model`.
pub const DEFAULT_CARD_NAME: &str = LINK_NAME;

/// Controller clock input the system clock is configured on.
pub const SYSCLK_ID: u32 = 0;

/// The master clock comes from the board oscillator (Y4, 24.576 MHz) and is
/// supplied to the controller.
pub const SYSCLK_DIRECTION: ClockDirection = ClockDirection::In;

/// Maximum codecs on one link. Each codec occupies one McASP serializer and
/// the largest McASP instance has 16.
pub const MAX_CODECS: usize = 16;

/// Maximum length of a codec DAI name, in bytes. Longer names fail
/// resolution.
pub const MAX_NAME_LEN: usize = 80;

/// Maximum length of a card name, in bytes (ALSA long name). Longer `model`
/// strings are cut on a character boundary.
pub const MAX_CARD_NAME_LEN: usize = 80;

/// Maximum length of a fully prefixed property key, in bytes.
pub const MAX_KEY_LEN: usize = 48;
