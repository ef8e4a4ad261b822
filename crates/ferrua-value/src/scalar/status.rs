//! Protocol status code.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::impl_builtin_scalar;

/// 32-bit status code. The top bits carry the severity: `00` good,
/// `01` uncertain, `10` bad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u32);

impl StatusCode {
    /// The all-good status.
    pub const GOOD: StatusCode = StatusCode(0);

    /// Severity bits say "good".
    #[must_use]
    pub const fn is_good(self) -> bool {
        self.0 >> 30 == 0b00
    }

    /// Severity bits say "bad".
    #[must_use]
    pub const fn is_bad(self) -> bool {
        self.0 >> 30 == 0b10
    }
}

impl From<u32> for StatusCode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl_builtin_scalar! {
    StatusCode => StatusCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bits() {
        assert!(StatusCode::GOOD.is_good());
        assert!(!StatusCode::GOOD.is_bad());
        assert!(StatusCode(0x8000_0000).is_bad());
    }

    #[test]
    fn renders_as_hex() {
        assert_eq!(StatusCode(0x8003_0000).to_string(), "0x80030000");
    }
}
