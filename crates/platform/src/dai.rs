//! Digital audio interface (DAI) abstraction
//!
//! Describes the serial frame format shared by a controller and its codecs,
//! and the controller-side system clock configuration issued once stream
//! parameters are known.
//!
//! # Format word layout
//!
//! [`DaiFormat::bits`] packs the format the same way ASoC's `dai_fmt` does:
//!
//! ```text
//! bits  0..4   protocol     (I2S = 1, right-j = 2, left-j = 3, DSP A = 4, DSP B = 5)
//! bits  8..12  inversion    (NB_NF = 0, NB_IF = 2, IB_NF = 3, IB_IF = 4)
//! bits 12..16  clocking     (CBM_CFM = 1, CBS_CFM = 2, CBM_CFS = 3, CBS_CFS = 4)
//! ```

/// Serial data protocol on the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaiProtocol {
    /// Philips I2S
    I2s,
    /// Right justified
    RightJustified,
    /// Left justified
    LeftJustified,
    /// DSP mode A (frame sync one bit before data)
    DspA,
    /// DSP mode B
    DspB,
}

impl DaiProtocol {
    const fn bits(self) -> u32 {
        match self {
            Self::I2s => 1,
            Self::RightJustified => 2,
            Self::LeftJustified => 3,
            Self::DspA => 4,
            Self::DspB => 5,
        }
    }
}

/// Which side generates bit clock and frame sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaiClocking {
    /// Codec drives bit clock and frame sync.
    CodecProvider,
    /// Codec drives frame sync only.
    CodecFrameProvider,
    /// Codec drives bit clock only.
    CodecBitProvider,
    /// Controller drives bit clock and frame sync; codec is consumer of both.
    CodecConsumer,
}

impl DaiClocking {
    const fn bits(self) -> u32 {
        match self {
            Self::CodecProvider => 1 << 12,
            Self::CodecFrameProvider => 2 << 12,
            Self::CodecBitProvider => 3 << 12,
            Self::CodecConsumer => 4 << 12,
        }
    }
}

/// Bit-clock / frame-sync polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockInversion {
    /// Normal bit clock, normal frame
    NormalBitNormalFrame,
    /// Normal bit clock, inverted frame
    NormalBitInvertedFrame,
    /// Inverted bit clock, normal frame
    InvertedBitNormalFrame,
    /// Inverted bit clock, inverted frame
    InvertedBitInvertedFrame,
}

impl ClockInversion {
    const fn bits(self) -> u32 {
        match self {
            Self::NormalBitNormalFrame => 0,
            Self::NormalBitInvertedFrame => 2 << 8,
            Self::InvertedBitNormalFrame => 3 << 8,
            Self::InvertedBitInvertedFrame => 4 << 8,
        }
    }
}

/// Complete frame format of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaiFormat {
    /// Serial protocol
    pub protocol: DaiProtocol,
    /// Clock/frame provider roles
    pub clocking: DaiClocking,
    /// Clock polarity
    pub inversion: ClockInversion,
}

impl DaiFormat {
    /// Packed format word (see module docs).
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.protocol.bits() | self.inversion.bits() | self.clocking.bits()
    }
}

/// Direction of the controller's system clock pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDirection {
    /// Clock is supplied to the controller from an external oscillator.
    In,
    /// Controller generates the clock.
    Out,
}

/// DAI configuration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaiError {
    /// The requested rate or clock id is not supported by the DAI.
    Unsupported,
    /// The DAI rejected the configuration for a hardware reason.
    Hardware,
}

#[cfg(feature = "std")]
impl std::error::Error for DaiError {}

impl core::fmt::Display for DaiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "DAI configuration not supported"),
            Self::Hardware => write!(f, "DAI hardware error"),
        }
    }
}

/// Controller-side DAI of a running session.
pub trait CpuDai {
    /// Configure the DAI system clock.
    ///
    /// `clk_id` selects the clock input, `freq_hz` its frequency and `dir`
    /// whether it is supplied to or generated by the controller.
    fn set_sysclk(&mut self, clk_id: u32, freq_hz: u32, dir: ClockDirection)
        -> Result<(), DaiError>;
}
