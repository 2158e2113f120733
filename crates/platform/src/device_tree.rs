//! Hardware description abstraction
//!
//! The board's audio topology is described by a device-tree node. The core
//! never parses the tree itself; it queries an injected, read-only
//! [`HardwareDescription`] by property key.

use core::num::NonZeroU32;

/// Reference to another node in the hardware description (a phandle).
///
/// Non-null by construction: phandle `0` is not a valid reference, so a
/// resolved `NodeRef` always points somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct NodeRef(NonZeroU32);

impl NodeRef {
    /// Wrap a raw phandle, returning `None` for the null phandle `0`.
    #[must_use]
    pub const fn new(phandle: u32) -> Option<Self> {
        match NonZeroU32::new(phandle) {
            Some(p) => Some(Self(p)),
            None => None,
        }
    }

    /// Raw phandle value.
    #[must_use]
    pub const fn phandle(self) -> u32 {
        self.0.get()
    }
}

/// Property lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PropertyError {
    /// The property is not present on the node.
    NotFound,
    /// The property exists but its value has the wrong type or encoding.
    Malformed,
}

#[cfg(feature = "std")]
impl std::error::Error for PropertyError {}

impl core::fmt::Display for PropertyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "property not found"),
            Self::Malformed => write!(f, "property value is malformed"),
        }
    }
}

/// Read-only view of one device-tree node.
///
/// Keys are full property names including any vendor prefix
/// (e.g. `"nulbbb,audio-codec"`).
pub trait HardwareDescription {
    /// The node's `compatible` tag, used to select the board variant.
    fn compatible(&self) -> Option<&str>;

    /// Resolve entry `index` of a reference-list property.
    ///
    /// Returns `None` when the property is missing, the index is out of
    /// range, or the phandle does not point at an existing node.
    fn get_reference(&self, key: &str, index: usize) -> Option<NodeRef>;

    /// Number of entries in a reference-list property.
    fn count_references(&self, key: &str) -> Result<usize, PropertyError>;

    /// Read a single string property.
    fn get_string(&self, key: &str) -> Result<&str, PropertyError>;

    /// Read a single unsigned 32-bit property.
    fn get_u32(&self, key: &str) -> Result<u32, PropertyError>;

    /// Read every entry of a string-list property, in order.
    fn get_string_array(
        &self,
        key: &str,
    ) -> Result<impl Iterator<Item = &str> + '_, PropertyError>;
}
