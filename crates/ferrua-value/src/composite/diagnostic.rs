//! Diagnostic information with optional, mask-gated fields.
//!
//! The encoding mask has one bit per optional field. The representation
//! always carries storage for every field; the mask governs meaning, not
//! allocation. In particular the string-table index fields stay plain
//! `i32` with `0` a legal index — presence is decided by the mask alone.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::{StatusCode, UaString};

/// Diagnostic detail attached to a service result, possibly nested: each
/// level can carry the diagnostic of the layer below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticInfo {
    /// One bit per optional field; see the `MASK_*` constants.
    pub encoding_mask: u8,
    /// String-table index of the symbolic error name.
    pub symbolic_id: i32,
    /// String-table index of the namespace the symbolic id lives in.
    pub namespace_uri: i32,
    /// String-table index of a localized description.
    pub localized_text: i32,
    /// String-table index of the locale of `localized_text`.
    pub locale: i32,
    /// Free-form vendor detail.
    pub additional_info: UaString,
    /// Status reported by the inner layer.
    pub inner_status_code: StatusCode,
    /// Diagnostic of the inner layer; exclusively owned, no cycles by
    /// construction.
    pub inner: Option<Box<DiagnosticInfo>>,
}

impl DiagnosticInfo {
    pub const MASK_SYMBOLIC_ID: u8 = 0x01;
    pub const MASK_NAMESPACE_URI: u8 = 0x02;
    pub const MASK_LOCALIZED_TEXT: u8 = 0x04;
    pub const MASK_LOCALE: u8 = 0x08;
    pub const MASK_ADDITIONAL_INFO: u8 = 0x10;
    pub const MASK_INNER_STATUS_CODE: u8 = 0x20;
    pub const MASK_INNER_DIAGNOSTIC_INFO: u8 = 0x40;

    /// Whether the mask marks a field as present.
    #[inline]
    #[must_use]
    pub fn has(&self, mask_bit: u8) -> bool {
        self.encoding_mask & mask_bit != 0
    }

    /// Nesting depth below this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner.as_ref().map_or(0, |d| 1 + d.depth())
    }
}

impl fmt::Display for DiagnosticInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticInfo{{mask=0x{:02x}", self.encoding_mask)?;
        if self.has(Self::MASK_SYMBOLIC_ID) {
            write!(f, ", symbolicId={}", self.symbolic_id)?;
        }
        if self.has(Self::MASK_ADDITIONAL_INFO) {
            write!(f, ", additionalInfo={}", self.additional_info)?;
        }
        if self.has(Self::MASK_INNER_STATUS_CODE) {
            write!(f, ", innerStatus={}", self.inner_status_code)?;
        }
        if let Some(inner) = &self.inner {
            write!(f, ", inner={inner}")?;
        }
        f.write_str("}")
    }
}

impl BuiltinType for DiagnosticInfo {
    const TYPE_ID: TypeId = TypeId::DiagnosticInfo;
    const NAME: &'static str = "DiagnosticInfo";

    fn deep_copy(&self) -> ValueResult<Self> {
        let inner = match &self.inner {
            Some(inner) => Some(Box::new(inner.deep_copy()?)),
            None => None,
        };
        Ok(Self {
            encoding_mask: self.encoding_mask,
            symbolic_id: self.symbolic_id,
            namespace_uri: self.namespace_uri,
            localized_text: self.localized_text,
            locale: self.locale,
            additional_info: self.additional_info.deep_copy()?,
            inner_status_code: self.inner_status_code,
            inner,
        })
    }

    fn wrap(self) -> Value {
        Value::DiagnosticInfo(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::DiagnosticInfo(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::DiagnosticInfo(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(depth: usize) -> DiagnosticInfo {
        let mut node = DiagnosticInfo {
            encoding_mask: DiagnosticInfo::MASK_ADDITIONAL_INFO,
            additional_info: UaString::from_text(&format!("level {depth}")),
            ..DiagnosticInfo::default()
        };
        let mut remaining = depth;
        while remaining > 0 {
            remaining -= 1;
            node = DiagnosticInfo {
                encoding_mask: DiagnosticInfo::MASK_ADDITIONAL_INFO
                    | DiagnosticInfo::MASK_INNER_DIAGNOSTIC_INFO,
                additional_info: UaString::from_text(&format!("level {remaining}")),
                inner: Some(Box::new(node)),
                ..DiagnosticInfo::default()
            };
        }
        node
    }

    #[test]
    fn chains_round_trip_at_depths_zero_one_and_five() {
        for depth in [0, 1, 5] {
            let original = chain(depth);
            assert_eq!(original.depth(), depth);

            let copy = original.deep_copy().unwrap();
            assert_eq!(copy, original);
            assert_eq!(copy.depth(), depth);
        }
    }

    #[test]
    fn clear_releases_the_whole_chain() {
        let mut di = chain(5);
        di.clear();
        assert_eq!(di, DiagnosticInfo::default());
        assert_eq!(di.depth(), 0);
        di.clear();
        assert_eq!(di, DiagnosticInfo::default());
    }

    #[test]
    fn copy_is_structurally_independent() {
        let original = chain(2);
        let mut copy = original.deep_copy().unwrap();
        copy.inner = None;
        assert_eq!(original.depth(), 2);
    }

    #[test]
    fn mask_gates_meaning_not_storage() {
        let di = DiagnosticInfo {
            symbolic_id: 7,
            ..DiagnosticInfo::default()
        };
        // Field holds a value, but the mask says it is absent.
        assert!(!di.has(DiagnosticInfo::MASK_SYMBOLIC_ID));
        assert_eq!(di.symbolic_id, 7);
    }
}
