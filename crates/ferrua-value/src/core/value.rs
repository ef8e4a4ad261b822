//! The runtime value sum over all built-in types.
//!
//! `Value` is the type-erased element representation the array engine and
//! the operation tables work over. Decoded protocol data determines the
//! concrete variant at runtime.

use std::fmt;

use crate::composite::{DataValue, DiagnosticInfo, ExtensionObject, LocalizedText, QualifiedName};
use crate::core::kind::TypeId;
use crate::core::ops::{type_ops, InvalidType, TypeOps};
use crate::identifier::{ExpandedNodeId, NodeId};
use crate::scalar::{ByteString, Guid, StatusCode, UaString, XmlElement};
use crate::temporal::DateTime;
use crate::variant::Variant;

/// One value of any built-in protocol type.
///
/// Not `Clone`: copying a value can fail (size ceilings, datasource reads),
/// so duplication goes through the fallible `copy` of the type's
/// [`TypeOps`] or the concrete type's `deep_copy`.
#[derive(Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(UaString),
    DateTime(DateTime),
    Guid(Guid),
    ByteString(ByteString),
    XmlElement(XmlElement),
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    ExtensionObject(ExtensionObject),
    DataValue(DataValue),
    Variant(Variant),
    DiagnosticInfo(DiagnosticInfo),
    /// Sentinel for an unrecognized protocol type id.
    Invalid(InvalidType),
}

impl Value {
    /// The protocol type id of the held value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::Boolean(_) => TypeId::Boolean,
            Self::SByte(_) => TypeId::SByte,
            Self::Byte(_) => TypeId::Byte,
            Self::Int16(_) => TypeId::Int16,
            Self::UInt16(_) => TypeId::UInt16,
            Self::Int32(_) => TypeId::Int32,
            Self::UInt32(_) => TypeId::UInt32,
            Self::Int64(_) => TypeId::Int64,
            Self::UInt64(_) => TypeId::UInt64,
            Self::Float(_) => TypeId::Float,
            Self::Double(_) => TypeId::Double,
            Self::String(_) => TypeId::String,
            Self::DateTime(_) => TypeId::DateTime,
            Self::Guid(_) => TypeId::Guid,
            Self::ByteString(_) => TypeId::ByteString,
            Self::XmlElement(_) => TypeId::XmlElement,
            Self::NodeId(_) => TypeId::NodeId,
            Self::ExpandedNodeId(_) => TypeId::ExpandedNodeId,
            Self::StatusCode(_) => TypeId::StatusCode,
            Self::QualifiedName(_) => TypeId::QualifiedName,
            Self::LocalizedText(_) => TypeId::LocalizedText,
            Self::ExtensionObject(_) => TypeId::ExtensionObject,
            Self::DataValue(_) => TypeId::DataValue,
            Self::Variant(_) => TypeId::Variant,
            Self::DiagnosticInfo(_) => TypeId::DiagnosticInfo,
            Self::Invalid(_) => TypeId::Invalid,
        }
    }

    /// Human-readable name of the held type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_id().name()
    }

    /// The operation table of the held type.
    #[must_use]
    pub fn ops(&self) -> &'static TypeOps {
        type_ops(self.type_id())
    }

    /// Whether this is the invalid-type sentinel.
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Invalid(InvalidType)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&(self.ops().render)(self))
    }
}
