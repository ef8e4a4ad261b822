//! 128-bit globally unique identifier.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::impl_builtin_scalar;

/// Fixed 128-bit identifier. Pure value type: bitwise equality, no heap
/// ownership, release is a no-op kept only for contract uniformity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    /// Assemble from the four wire fields.
    #[must_use]
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// Whether every bit is zero.
    #[must_use]
    pub fn is_null(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}

impl_builtin_scalar! {
    Guid => Guid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_bitwise() {
        let a = Guid::new(1, 2, 3, [4, 5, 6, 7, 8, 9, 10, 11]);
        let b = Guid::new(1, 2, 3, [4, 5, 6, 7, 8, 9, 10, 11]);
        let c = Guid::new(1, 2, 3, [4, 5, 6, 7, 8, 9, 10, 12]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn default_is_null() {
        assert!(Guid::default().is_null());
        assert!(!Guid::new(1, 0, 0, [0; 8]).is_null());
    }

    #[test]
    fn renders_in_canonical_form() {
        let g = Guid::new(
            0x0001_0203,
            0x0405,
            0x0607,
            [0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f],
        );
        assert_eq!(g.to_string(), "00010203-0405-0607-0809-0a0b0c0d0e0f");
    }
}
