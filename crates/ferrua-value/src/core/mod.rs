//! Core machinery: the lifecycle contract, the runtime value sum, the
//! operation-table registry, size ceilings and the array engine.

pub mod array;
pub mod kind;
pub mod limits;
pub mod ops;
pub mod value;

pub use kind::{TypeId, MAX_BUILTIN_TYPE_ID};
pub use limits::ValueLimits;
pub use ops::{type_ops, BuiltinType, InvalidType, TypeOps};
pub use value::Value;
