//! 128-bit identifiers for file structures
//!
//! PRC identifies every file structure (and the file itself) by a 128-bit
//! value stored as four little-endian 32-bit words.

use std::fmt;

/// A 128-bit identifier stored as four 32-bit words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Uid(pub [u32; 4]);

impl Uid {
    /// The nil identifier, used for the application identifier by default
    pub const NIL: Uid = Uid([0; 4]);

    /// Create an identifier from its four words
    #[inline]
    pub const fn new(words: [u32; 4]) -> Self {
        Uid(words)
    }

    /// Split a 128-bit value into words, most significant first
    pub const fn from_u128(value: u128) -> Self {
        Uid([
            (value >> 96) as u32,
            (value >> 64) as u32,
            (value >> 32) as u32,
            value as u32,
        ])
    }

    /// Reassemble the 128-bit value
    pub const fn as_u128(&self) -> u128 {
        ((self.0[0] as u128) << 96)
            | ((self.0[1] as u128) << 64)
            | ((self.0[2] as u128) << 32)
            | self.0[3] as u128
    }

    /// The four words in write order
    #[inline]
    pub const fn words(&self) -> [u32; 4] {
        self.0
    }

    /// Check if this is the nil identifier
    #[inline]
    pub const fn is_nil(&self) -> bool {
        self.as_u128() == 0
    }
}

impl From<[u32; 4]> for Uid {
    fn from(words: [u32; 4]) -> Self {
        Uid(words)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08X}-{:08X}-{:08X}-{:08X}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
