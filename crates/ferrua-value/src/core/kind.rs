//! Protocol type identifiers.
//!
//! `TypeId` is the closed set of built-in types the protocol exchanges,
//! carrying the numeric identifiers reserved in namespace 0. Identifiers
//! decoded from the wire that fall outside the set map to [`TypeId::Invalid`],
//! whose operation table rejects every fallible operation.

use std::fmt;

/// Identifier of a built-in protocol type.
///
/// Discriminant values are the reserved namespace-0 numeric ids; `Invalid`
/// sits at 0, which no built-in type uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TypeId {
    Invalid = 0,
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    XmlElement = 16,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
    DataValue = 23,
    Variant = 24,
    DiagnosticInfo = 25,
}

/// Highest numeric id reserved for a built-in type.
pub const MAX_BUILTIN_TYPE_ID: u32 = TypeId::DiagnosticInfo as u32;

impl TypeId {
    /// All built-in type ids, in registry order (the `Invalid` sentinel
    /// first).
    pub const ALL: [TypeId; 26] = [
        TypeId::Invalid,
        TypeId::Boolean,
        TypeId::SByte,
        TypeId::Byte,
        TypeId::Int16,
        TypeId::UInt16,
        TypeId::Int32,
        TypeId::UInt32,
        TypeId::Int64,
        TypeId::UInt64,
        TypeId::Float,
        TypeId::Double,
        TypeId::String,
        TypeId::DateTime,
        TypeId::Guid,
        TypeId::ByteString,
        TypeId::XmlElement,
        TypeId::NodeId,
        TypeId::ExpandedNodeId,
        TypeId::StatusCode,
        TypeId::QualifiedName,
        TypeId::LocalizedText,
        TypeId::ExtensionObject,
        TypeId::DataValue,
        TypeId::Variant,
        TypeId::DiagnosticInfo,
    ];

    /// Map a numeric protocol id to a type id.
    ///
    /// Unrecognized ids yield [`TypeId::Invalid`] rather than an error; the
    /// sentinel's operation table fails every fallible operation, so the
    /// mistake surfaces at the first attempted use.
    #[must_use]
    pub fn from_id(id: u32) -> Self {
        match id {
            1 => Self::Boolean,
            2 => Self::SByte,
            3 => Self::Byte,
            4 => Self::Int16,
            5 => Self::UInt16,
            6 => Self::Int32,
            7 => Self::UInt32,
            8 => Self::Int64,
            9 => Self::UInt64,
            10 => Self::Float,
            11 => Self::Double,
            12 => Self::String,
            13 => Self::DateTime,
            14 => Self::Guid,
            15 => Self::ByteString,
            16 => Self::XmlElement,
            17 => Self::NodeId,
            18 => Self::ExpandedNodeId,
            19 => Self::StatusCode,
            20 => Self::QualifiedName,
            21 => Self::LocalizedText,
            22 => Self::ExtensionObject,
            23 => Self::DataValue,
            24 => Self::Variant,
            25 => Self::DiagnosticInfo,
            _ => Self::Invalid,
        }
    }

    /// Human-readable type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::ByteString => "ByteString",
            Self::XmlElement => "XmlElement",
            Self::NodeId => "NodeId",
            Self::ExpandedNodeId => "ExpandedNodeId",
            Self::StatusCode => "StatusCode",
            Self::QualifiedName => "QualifiedName",
            Self::LocalizedText => "LocalizedText",
            Self::ExtensionObject => "ExtensionObject",
            Self::DataValue => "DataValue",
            Self::Variant => "Variant",
            Self::DiagnosticInfo => "DiagnosticInfo",
        }
    }

    /// Whether this is the invalid-type sentinel.
    #[inline]
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_round_trips_every_builtin() {
        for id in TypeId::ALL {
            if id.is_invalid() {
                continue;
            }
            assert_eq!(TypeId::from_id(id as u32), id);
        }
    }

    #[test]
    fn unknown_ids_map_to_invalid() {
        assert_eq!(TypeId::from_id(0), TypeId::Invalid);
        assert_eq!(TypeId::from_id(26), TypeId::Invalid);
        assert_eq!(TypeId::from_id(u32::MAX), TypeId::Invalid);
    }

    #[test]
    fn diagnostic_info_is_the_highest_builtin() {
        assert_eq!(MAX_BUILTIN_TYPE_ID, 25);
    }
}
