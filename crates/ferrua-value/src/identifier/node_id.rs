//! Node identifiers.
//!
//! A `NodeId` pairs a namespace index with one of four identifier kinds.
//! The kind and its payload live in one tagged enum, so no observer can
//! ever see a discriminant that disagrees with the payload — not even
//! transiently during a copy.

use std::fmt;

use crate::core::kind::{TypeId, MAX_BUILTIN_TYPE_ID};
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::{ByteString, Guid, UaString};

/// The four identifier kinds a node id can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Numeric(u32),
    String(UaString),
    Guid(Guid),
    ByteString(ByteString),
}

impl Default for Identifier {
    fn default() -> Self {
        Self::Numeric(0)
    }
}

impl Identifier {
    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(match self {
            Self::Numeric(n) => Self::Numeric(*n),
            Self::String(s) => Self::String(s.deep_copy()?),
            Self::Guid(g) => Self::Guid(*g),
            Self::ByteString(b) => Self::ByteString(b.deep_copy()?),
        })
    }
}

/// Protocol node identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeId {
    pub namespace_index: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// Numeric identifier.
    #[must_use]
    pub const fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Numeric(value),
        }
    }

    /// String identifier, copying the text.
    #[must_use]
    pub fn string(namespace_index: u16, name: &str) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::String(UaString::from_text(name)),
        }
    }

    /// Guid identifier.
    #[must_use]
    pub const fn guid(namespace_index: u16, guid: Guid) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Guid(guid),
        }
    }

    /// Opaque byte identifier.
    #[must_use]
    pub const fn byte_string(namespace_index: u16, bytes: ByteString) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::ByteString(bytes),
        }
    }

    /// The numeric id of a built-in type, in namespace 0.
    #[must_use]
    pub const fn for_type(id: TypeId) -> Self {
        Self::numeric(0, id as u32)
    }

    /// Whether this id denotes one of the reserved built-in types:
    /// namespace 0, numeric kind, value at most the highest reserved id.
    #[must_use]
    pub fn is_basic_type(&self) -> bool {
        self.namespace_index == 0
            && matches!(self.identifier, Identifier::Numeric(n) if n <= MAX_BUILTIN_TYPE_ID)
    }

    /// The null predicate is kind-specific: zero for numeric, logical
    /// length 0 for string/bytes, all-zero bits for guid — and namespace 0
    /// in every case.
    #[must_use]
    pub fn is_null(&self) -> bool {
        if self.namespace_index != 0 {
            return false;
        }
        match &self.identifier {
            Identifier::Numeric(n) => *n == 0,
            Identifier::String(s) => s.is_empty(),
            Identifier::Guid(g) => g.is_null(),
            Identifier::ByteString(b) => b.is_empty(),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns={};", self.namespace_index)?;
        match &self.identifier {
            Identifier::Numeric(n) => write!(f, "i={n}"),
            Identifier::String(s) => write!(f, "s={s}"),
            Identifier::Guid(g) => write!(f, "g={g}"),
            Identifier::ByteString(b) => write!(f, "b={b}"),
        }
    }
}

impl BuiltinType for NodeId {
    const TYPE_ID: TypeId = TypeId::NodeId;
    const NAME: &'static str = "NodeId";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            namespace_index: self.namespace_index,
            identifier: self.identifier.deep_copy()?,
        })
    }

    fn wrap(self) -> Value {
        Value::NodeId(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::NodeId(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::NodeId(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn samples() -> [NodeId; 4] {
        [
            NodeId::numeric(2, 1042),
            NodeId::string(2, "pump.speed"),
            NodeId::guid(2, Guid::new(1, 2, 3, [4; 8])),
            NodeId::byte_string(2, ByteString::from_bytes(Bytes::from_static(b"\x01\x02"))),
        ]
    }

    #[test]
    fn copy_preserves_kind_and_payload() {
        for id in samples() {
            let copy = id.deep_copy().unwrap();
            assert_eq!(copy, id);
            assert_eq!(
                std::mem::discriminant(&copy.identifier),
                std::mem::discriminant(&id.identifier)
            );
        }
    }

    #[test]
    fn namespace_mismatch_beats_payload_equality() {
        for id in samples() {
            let mut other = id.deep_copy().unwrap();
            other.namespace_index = 7;
            assert_ne!(other, id);
        }
    }

    #[test]
    fn kinds_never_compare_equal_to_each_other() {
        assert_ne!(NodeId::numeric(0, 0), NodeId::string(0, ""));
    }

    #[test]
    fn null_predicate_is_kind_specific() {
        assert!(NodeId::numeric(0, 0).is_null());
        assert!(NodeId::string(0, "").is_null());
        assert!(NodeId::guid(0, Guid::default()).is_null());
        assert!(NodeId::byte_string(0, ByteString::null()).is_null());

        assert!(!NodeId::numeric(1, 0).is_null());
        assert!(!NodeId::numeric(0, 1).is_null());
        assert!(!NodeId::string(0, "x").is_null());
    }

    #[test]
    fn basic_type_predicate() {
        assert!(NodeId::for_type(TypeId::Boolean).is_basic_type());
        assert!(NodeId::for_type(TypeId::DiagnosticInfo).is_basic_type());
        assert!(!NodeId::numeric(0, MAX_BUILTIN_TYPE_ID + 1).is_basic_type());
        assert!(!NodeId::numeric(1, 1).is_basic_type());
        assert!(!NodeId::string(0, "Boolean").is_basic_type());
    }

    #[test]
    fn clear_resets_to_the_null_numeric_id() {
        let mut id = NodeId::string(4, "drop me");
        id.clear();
        assert_eq!(id, NodeId::default());
        assert!(id.is_null());
    }
}
