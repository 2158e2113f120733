//! Link topology resolution
//!
//! Reads one audio link out of the hardware description and validates it:
//!
//! ```text
//! <prefix>mcasp-controller  → controller (CPU DAI + platform)   required
//! <prefix>audio-codec       → codec references, count >= 1      required
//! <prefix>codec-name        → one DAI name per codec, in order  required
//! <prefix>codec-clock-rate  → controller sysclk, 0 = unset      optional
//! <prefix>model             → card display name                 optional
//! ```
//!
//! Resolution only reads; the description is never mutated. Names are
//! copied into fixed-capacity buffers so the resulting [`LinkDescriptor`]
//! does not borrow from the description.

use platform::{DaiFormat, HardwareDescription, NodeRef, PropertyError, SysclkHz};

use crate::config::{
    LINK_NAME, MAX_CARD_NAME_LEN, MAX_CODECS, MAX_KEY_LEN, MAX_NAME_LEN, PROP_CLOCK_RATE, PROP_CODECS,
    PROP_CODEC_NAMES, PROP_CONTROLLER, PROP_MODEL, STREAM_NAME,
};
use crate::variant::LinkVariant;
use crate::Error;

/// Codec DAI name.
pub type DaiName = heapless::String<MAX_NAME_LEN>;

/// Card display name.
pub type CardName = heapless::String<MAX_CARD_NAME_LEN>;

type PropertyKey = heapless::String<MAX_KEY_LEN>;

/// Copy `s` into a fixed buffer, rejecting anything that does not fit.
pub(crate) fn bounded_name(s: &str) -> Result<DaiName, Error> {
    let mut out = DaiName::new();
    for c in s.chars() {
        out.push(c).map_err(|_| Error::NameTooLong)?;
    }
    Ok(out)
}

/// Copy `s` into a card name buffer, cutting it on a character boundary if
/// it does not fit.
pub(crate) fn truncated_card_name(s: &str) -> CardName {
    let mut out = CardName::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            tracing::warn!("card name `{}` truncated to `{}`", s, out.as_str());
            break;
        }
    }
    out
}

/// One codec attached to a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecBinding {
    node: NodeRef,
    dai_name: DaiName,
}

impl CodecBinding {
    /// Codec device node.
    pub fn node(&self) -> NodeRef {
        self.node
    }

    /// DAI name on the codec.
    pub fn dai_name(&self) -> &str {
        &self.dai_name
    }
}

/// Fully resolved audio link.
///
/// Only [`TopologyResolver`] builds one, so it always has a controller and
/// at least one codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDescriptor {
    variant: LinkVariant,
    controller: NodeRef,
    codecs: heapless::Vec<CodecBinding, MAX_CODECS>,
    sysclk: SysclkHz,
}

impl LinkDescriptor {
    /// Link name.
    pub fn name(&self) -> &'static str {
        LINK_NAME
    }

    /// Stream name.
    pub fn stream_name(&self) -> &'static str {
        STREAM_NAME
    }

    /// Frame-format variant.
    pub fn variant(&self) -> LinkVariant {
        self.variant
    }

    /// Frame format shared by controller and codecs.
    pub fn format(&self) -> DaiFormat {
        self.variant.dai_format()
    }

    /// Controller node, acting as CPU DAI.
    pub fn controller(&self) -> NodeRef {
        self.controller
    }

    /// Platform (DMA) node. The McASP serves both roles.
    pub fn platform(&self) -> NodeRef {
        self.controller
    }

    /// Codecs in description order. Never empty.
    pub fn codecs(&self) -> &[CodecBinding] {
        &self.codecs
    }

    /// Controller sysclk target.
    pub fn sysclk(&self) -> SysclkHz {
        self.sysclk
    }
}

/// Reads link topology from one description node under a property prefix.
pub struct TopologyResolver<'a, H> {
    node: &'a H,
    prefix: &'a str,
}

impl<'a, H: HardwareDescription> TopologyResolver<'a, H> {
    /// Resolver for `node`, reading keys under `prefix` (e.g. `"nulbbb,"`).
    pub fn new(node: &'a H, prefix: &'a str) -> Self {
        Self { node, prefix }
    }

    fn key(&self, name: &str) -> Result<PropertyKey, Error> {
        let mut key = PropertyKey::new();
        key.push_str(self.prefix).map_err(|_| Error::NameTooLong)?;
        key.push_str(name).map_err(|_| Error::NameTooLong)?;
        Ok(key)
    }

    /// Resolve the controller reference.
    pub fn controller(&self) -> Result<NodeRef, Error> {
        self.node
            .get_reference(&self.key(PROP_CONTROLLER)?, 0)
            .ok_or(Error::MissingController)
    }

    /// Number of codecs on the link, validated against [`MAX_CODECS`].
    pub fn codec_count(&self) -> Result<usize, Error> {
        let count = match self.node.count_references(&self.key(PROP_CODECS)?) {
            Ok(count) => count,
            Err(PropertyError::NotFound) => 0,
            Err(PropertyError::Malformed) => {
                tracing::error!("failed to parse property `{}{}`", self.prefix, PROP_CODECS);
                0
            }
        };
        if count == 0 {
            return Err(Error::NoCodecsSpecified);
        }
        if count > MAX_CODECS {
            return Err(Error::TooManyCodecs { count });
        }
        Ok(count)
    }

    /// Codec DAI names. The list must have exactly `count` entries.
    pub fn codec_names(&self, count: usize) -> Result<heapless::Vec<DaiName, MAX_CODECS>, Error> {
        let key = self.key(PROP_CODEC_NAMES)?;
        let mut names = heapless::Vec::new();
        let mut listed = 0usize;
        let mut too_long = false;
        match self.node.get_string_array(&key) {
            Ok(entries) => {
                for name in entries {
                    listed = listed.saturating_add(1);
                    match bounded_name(name) {
                        // Entries past capacity only count; the length check rejects them.
                        Ok(name) => {
                            let _ = names.push(name);
                        }
                        Err(_) => too_long = true,
                    }
                }
            }
            Err(e) => tracing::error!("failed to parse property `{}`: {}", key.as_str(), e),
        }

        // A wrong count is reported before any oversized entry.
        if listed != count {
            return Err(Error::CodecNameMismatch {
                codecs: count,
                names: listed,
            });
        }
        if too_long {
            return Err(Error::NameTooLong);
        }
        Ok(names)
    }

    /// Resolve every codec binding.
    pub fn codecs(&self) -> Result<heapless::Vec<CodecBinding, MAX_CODECS>, Error> {
        let count = self.codec_count()?;
        tracing::debug!("trying to parse phandles for {} codecs", count);

        let names = self.codec_names(count)?;
        let key = self.key(PROP_CODECS)?;

        let mut codecs = heapless::Vec::new();
        for (index, dai_name) in names.into_iter().enumerate() {
            let Some(node) = self.node.get_reference(&key, index) else {
                tracing::error!("failed parsing codec #{}", index);
                return Err(Error::CodecResolutionFailed { index });
            };
            tracing::debug!("successfully parsed codec #{} ({})", index, dai_name.as_str());
            codecs
                .push(CodecBinding { node, dai_name })
                .map_err(|_| Error::TooManyCodecs { count })?;
        }
        Ok(codecs)
    }

    /// Controller sysclk. Absent means unset; present but malformed fails.
    pub fn sysclk(&self) -> Result<SysclkHz, Error> {
        match self.node.get_u32(&self.key(PROP_CLOCK_RATE)?) {
            Ok(hz) => Ok(SysclkHz::new(hz)),
            Err(PropertyError::NotFound) => {
                tracing::debug!("no `{}{}`, sysclk left unset", self.prefix, PROP_CLOCK_RATE);
                Ok(SysclkHz::UNSET)
            }
            Err(PropertyError::Malformed) => Err(Error::InvalidClockRate),
        }
    }

    /// Optional card display name, cut to [`MAX_CARD_NAME_LEN`] bytes.
    pub fn card_name(&self) -> Result<Option<CardName>, Error> {
        match self.node.get_string(&self.key(PROP_MODEL)?) {
            Ok(model) => Ok(Some(truncated_card_name(model))),
            Err(PropertyError::NotFound) => Ok(None),
            Err(PropertyError::Malformed) => Err(Error::InvalidCardName),
        }
    }

    /// Resolve the complete link.
    pub fn resolve_link(&self, variant: LinkVariant) -> Result<LinkDescriptor, Error> {
        let controller = self.controller()?;
        let codecs = self.codecs()?;
        let sysclk = self.sysclk()?;
        Ok(LinkDescriptor {
            variant,
            controller,
            codecs,
            sysclk,
        })
    }
}

/// Resolve the link described by `node` under `prefix`.
///
/// # Errors
///
/// See [`TopologyResolver::resolve_link`].
pub fn resolve_link<H: HardwareDescription>(
    node: &H,
    prefix: &str,
    variant: LinkVariant,
) -> Result<LinkDescriptor, Error> {
    TopologyResolver::new(node, prefix).resolve_link(variant)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::config::PREFIX;
    use platform::mocks::MockDeviceTree;

    fn board() -> MockDeviceTree {
        MockDeviceTree::new()
            .with_references("nulbbb,mcasp-controller", &[1])
            .with_references("nulbbb,audio-codec", &[2, 3])
            .with_strings("nulbbb,codec-name", &["tlv320aic3x-hifi", "pcm5102a-hifi"])
            .with_u32("nulbbb,codec-clock-rate", 24_576_000)
    }

    #[test]
    fn resolves_two_codec_link_in_order() {
        let link = resolve_link(&board(), PREFIX, LinkVariant::Standard).unwrap();
        assert_eq!(link.controller(), NodeRef::new(1).unwrap());
        assert_eq!(link.platform(), link.controller());
        let codecs = link.codecs();
        assert_eq!(codecs.len(), 2);
        assert_eq!(codecs[0].node(), NodeRef::new(2).unwrap());
        assert_eq!(codecs[0].dai_name(), "tlv320aic3x-hifi");
        assert_eq!(codecs[1].node(), NodeRef::new(3).unwrap());
        assert_eq!(codecs[1].dai_name(), "pcm5102a-hifi");
        assert_eq!(link.sysclk(), SysclkHz::new(24_576_000));
        assert_eq!(link.name(), "NUL BBB");
        assert_eq!(link.stream_name(), "Playback");
    }

    #[test]
    fn missing_controller() {
        let dt = board().without("nulbbb,mcasp-controller");
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::MissingController)
        );
    }

    #[test]
    fn null_controller_phandle_is_missing() {
        let dt = board().with_references("nulbbb,mcasp-controller", &[0]);
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::MissingController)
        );
    }

    #[test]
    fn empty_and_absent_codec_lists() {
        let empty = board().with_references("nulbbb,audio-codec", &[]);
        assert_eq!(
            resolve_link(&empty, PREFIX, LinkVariant::Standard),
            Err(Error::NoCodecsSpecified)
        );
        let absent = board().without("nulbbb,audio-codec");
        assert_eq!(
            resolve_link(&absent, PREFIX, LinkVariant::Standard),
            Err(Error::NoCodecsSpecified)
        );
    }

    #[test]
    fn too_many_codecs() {
        let refs: Vec<u32> = (2..).take(MAX_CODECS + 1).collect();
        let dt = board().with_references("nulbbb,audio-codec", &refs);
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::TooManyCodecs { count: MAX_CODECS + 1 })
        );
    }

    #[test]
    fn names_must_match_codec_count_exactly() {
        let short = board().with_strings("nulbbb,codec-name", &["a"]);
        assert_eq!(
            resolve_link(&short, PREFIX, LinkVariant::Standard),
            Err(Error::CodecNameMismatch { codecs: 2, names: 1 })
        );
        let long = board().with_strings("nulbbb,codec-name", &["a", "b", "c"]);
        assert_eq!(
            resolve_link(&long, PREFIX, LinkVariant::Standard),
            Err(Error::CodecNameMismatch { codecs: 2, names: 3 })
        );
        let absent = board().without("nulbbb,codec-name");
        assert_eq!(
            resolve_link(&absent, PREFIX, LinkVariant::Standard),
            Err(Error::CodecNameMismatch { codecs: 2, names: 0 })
        );
    }

    #[test]
    fn unresolvable_codec_reports_its_index() {
        let dt = board().with_references("nulbbb,audio-codec", &[2, 0]);
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::CodecResolutionFailed { index: 1 })
        );
    }

    #[test]
    fn oversized_dai_name_is_rejected() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let dt = board().with_strings("nulbbb,codec-name", &["a", &long]);
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::NameTooLong)
        );
    }

    #[test]
    fn absent_clock_rate_is_unset() {
        let dt = board().without("nulbbb,codec-clock-rate");
        let link = resolve_link(&dt, PREFIX, LinkVariant::Standard).unwrap();
        assert!(link.sysclk().is_unset());
    }

    #[test]
    fn malformed_clock_rate_fails() {
        let dt = board().with_string("nulbbb,codec-clock-rate", "24MHz");
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::InvalidClockRate)
        );
    }

    #[test]
    fn card_name_is_optional() {
        let resolver_dt = board();
        let resolver = TopologyResolver::new(&resolver_dt, PREFIX);
        assert_eq!(resolver.card_name(), Ok(None));

        let named = board().with_string("nulbbb,model", "Bench Cape");
        let resolver = TopologyResolver::new(&named, PREFIX);
        assert_eq!(resolver.card_name().unwrap().unwrap().as_str(), "Bench Cape");

        let broken = board().with_u32("nulbbb,model", 7);
        let resolver = TopologyResolver::new(&broken, PREFIX);
        assert_eq!(resolver.card_name(), Err(Error::InvalidCardName));
    }

    #[test]
    fn long_model_is_cut_not_rejected() {
        let model = "BeagleBone Black NUL Audio Cape Rev C";
        let dt = board().with_string("nulbbb,model", model);
        let name = TopologyResolver::new(&dt, PREFIX).card_name().unwrap().unwrap();
        assert_eq!(name.as_str(), model);

        let huge = "é".repeat(MAX_CARD_NAME_LEN);
        let dt = board().with_string("nulbbb,model", &huge);
        let name = TopologyResolver::new(&dt, PREFIX).card_name().unwrap().unwrap();
        assert_eq!(name.len(), MAX_CARD_NAME_LEN);
        assert!(huge.starts_with(name.as_str()));
    }

    #[test]
    fn more_than_eight_codecs_resolve() {
        let refs: Vec<u32> = (2..11).collect();
        let names = ["dummy"; 9];
        let dt = board()
            .with_references("nulbbb,audio-codec", &refs)
            .with_strings("nulbbb,codec-name", &names);
        let link = resolve_link(&dt, PREFIX, LinkVariant::Standard).unwrap();
        assert_eq!(link.codecs().len(), 9);
        assert_eq!(link.codecs()[8].node(), NodeRef::new(10).unwrap());
    }

    #[test]
    fn name_count_is_checked_before_name_length() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let dt = board().with_strings("nulbbb,codec-name", &[long.as_str()]);
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::CodecNameMismatch { codecs: 2, names: 1 })
        );
    }

    #[test]
    fn prefix_selects_namespace() {
        let dt = MockDeviceTree::new()
            .with_references("acme,mcasp-controller", &[1])
            .with_references("acme,audio-codec", &[2])
            .with_strings("acme,codec-name", &["x"]);
        assert!(resolve_link(&dt, "acme,", LinkVariant::Standard).is_ok());
        assert_eq!(
            resolve_link(&dt, PREFIX, LinkVariant::Standard),
            Err(Error::MissingController)
        );
    }

    #[test]
    fn variant_determines_format() {
        let link = resolve_link(&board(), PREFIX, LinkVariant::InvertedFrame).unwrap();
        assert_eq!(link.format(), LinkVariant::InvertedFrame.dai_format());
    }
}
