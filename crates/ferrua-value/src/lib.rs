#![warn(clippy::all)]
//! Built-in value types for OPC UA style protocol stacks.
//!
//! Every built-in type carries the same lifecycle contract — default
//! construction, deep copy, member release, value equality and a debug
//! rendering — expressed as the [`BuiltinType`] trait and type-erased
//! into per-type operation tables ([`TypeOps`]) for the code paths where
//! the element type is only known at runtime: the array engine and the
//! discriminated [`Variant`].

pub mod composite;
pub mod core;
pub mod error;
pub mod identifier;
pub mod scalar;
pub mod temporal;
pub mod variant;

pub use crate::core::{
    array, type_ops, BuiltinType, InvalidType, TypeId, TypeOps, Value, ValueLimits,
    MAX_BUILTIN_TYPE_ID,
};
pub use crate::error::{ValueError, ValueResult};

pub use crate::composite::{
    BodyEncoding, DataValue, DiagnosticInfo, ExtensionObject, LocalizedText, QualifiedName,
};
pub use crate::identifier::{ExpandedNodeId, Identifier, NodeId};
pub use crate::scalar::{ByteString, Guid, StatusCode, UaString, XmlElement};
pub use crate::temporal::{CalendarTime, DateTime, TICKS_PER_SECOND, UNIX_EPOCH_BIAS_SECS};
pub use crate::variant::{Datasource, Snapshot, Variant, VariantData};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        type_ops, BuiltinType, TypeId, Value, ValueError, ValueLimits, ValueResult, Variant,
    };
    pub use crate::{ByteString, DateTime, Guid, NodeId, StatusCode, UaString};
}
