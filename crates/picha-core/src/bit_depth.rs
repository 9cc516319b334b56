//! Image bit depth information

/// The image bit depth.
///
/// Samples are stored one per byte, so the only
/// depth the library fully supports is eight bits,
/// the common case for the formats we handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Images with this bit depth use [`u8`] to store
    /// pixels and use the whole range from 0-255.
    Eight,
    /// Bit depth information is unknown
    Unknown
}

impl Default for BitDepth {
    fn default() -> Self {
        Self::Unknown
    }
}

impl BitDepth {
    /// Return the number of bytes a single sample
    /// of this depth occupies in memory
    pub const fn size_of(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Unknown => 0
        }
    }

    /// Return the number of bits needed to represent
    /// a single sample of this depth
    pub const fn bit_size(self) -> usize {
        match self {
            Self::Eight => 8,
            Self::Unknown => 0
        }
    }
}
