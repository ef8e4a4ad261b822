//! The uniform lifecycle contract and its type-erased operation tables.
//!
//! Every built-in type implements [`BuiltinType`]: default construction
//! (via `Default`), deep copy, member release, value equality and a debug
//! rendering. [`TypeOps`] erases a `BuiltinType` impl into six function
//! pointers over [`Value`], which is what the array engine and `Variant`
//! dispatch through — the element type of decoded protocol data is only
//! known at runtime.
//!
//! The registry of operation tables is a `static` array built at compile
//! time from the closed set of built-in types. It is never mutated.

use std::fmt;

use crate::composite::{DataValue, DiagnosticInfo, ExtensionObject, LocalizedText, QualifiedName};
use crate::core::kind::TypeId;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::identifier::{ExpandedNodeId, NodeId};
use crate::scalar::{ByteString, Guid, StatusCode, UaString, XmlElement};
use crate::temporal::DateTime;
use crate::variant::Variant;

/// The lifecycle contract shared by every built-in type.
///
/// `Default` supplies default-initialization; `PartialEq` the baseline
/// equality (types with special rules, like the null/empty string class,
/// encode them in their `PartialEq` impl); `Display` the debug rendering.
pub trait BuiltinType: Default + PartialEq + fmt::Debug + fmt::Display + Sized {
    /// Protocol type identifier.
    const TYPE_ID: TypeId;
    /// Type name used in diagnostics.
    const NAME: &'static str;

    /// Produce an independent copy, allocating fresh buffers for every
    /// owned member.
    ///
    /// # Errors
    ///
    /// Fails when a sub-copy fails (size ceiling, datasource failure, or
    /// the invalid-type sentinel). Owned members already copied are dropped
    /// before the error surfaces; the destination never observes a mix of
    /// old and partially-copied state.
    fn deep_copy(&self) -> ValueResult<Self>;

    /// Release all heap-owned members and reset to the default value.
    /// Idempotent; a no-op on a default-initialized value.
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Value equality.
    fn value_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Human-readable rendering; diagnostic only.
    fn render(&self) -> String {
        self.to_string()
    }

    /// Heap-allocate a default-initialized instance wrapped in [`Value`].
    ///
    /// # Errors
    ///
    /// Only the invalid-type sentinel fails.
    fn new_boxed() -> ValueResult<Box<Value>> {
        Ok(Box::new(Self::default().wrap()))
    }

    /// Wrap into the runtime [`Value`] sum.
    fn wrap(self) -> Value;

    /// Borrow out of a [`Value`], failing on a type mismatch.
    ///
    /// # Errors
    ///
    /// [`ValueError::TypeMismatch`] when `value` holds a different type.
    fn try_ref(value: &Value) -> ValueResult<&Self>;

    /// Mutably borrow out of a [`Value`], failing on a type mismatch.
    ///
    /// # Errors
    ///
    /// [`ValueError::TypeMismatch`] when `value` holds a different type.
    fn try_mut(value: &mut Value) -> ValueResult<&mut Self>;
}

/// Type-erased operation table over [`Value`].
///
/// One table exists per built-in type; the array engine and `Variant` are
/// generic over `&'static TypeOps` rather than over a compile-time type.
pub struct TypeOps {
    /// Protocol type identifier of the table's type.
    pub type_id: TypeId,
    /// Type name used in diagnostics.
    pub name: &'static str,
    /// Reset the slot to the type's default value.
    pub init: fn(&mut Value),
    /// Heap-allocate a default-initialized instance.
    pub new_default: fn() -> ValueResult<Box<Value>>,
    /// Deep-copy `src` into `dst`, replacing `dst` wholesale.
    pub copy: fn(src: &Value, dst: &mut Value) -> ValueResult<()>,
    /// Release owned members and reset to the default value.
    pub clear: fn(&mut Value),
    /// Value equality; `false` on any type mismatch.
    pub equal: fn(&Value, &Value) -> bool,
    /// Debug rendering.
    pub render: fn(&Value) -> String,
}

impl TypeOps {
    /// Derive the operation table for a `BuiltinType` impl.
    pub const fn of<T: BuiltinType>() -> Self {
        Self {
            type_id: T::TYPE_ID,
            name: T::NAME,
            init: init_erased::<T>,
            new_default: new_erased::<T>,
            copy: copy_erased::<T>,
            clear: clear_erased::<T>,
            equal: equal_erased::<T>,
            render: render_erased::<T>,
        }
    }
}

impl fmt::Debug for TypeOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeOps")
            .field("type_id", &self.type_id)
            .field("name", &self.name)
            .finish()
    }
}

fn init_erased<T: BuiltinType>(value: &mut Value) {
    *value = T::default().wrap();
}

fn new_erased<T: BuiltinType>() -> ValueResult<Box<Value>> {
    T::new_boxed()
}

fn copy_erased<T: BuiltinType>(src: &Value, dst: &mut Value) -> ValueResult<()> {
    let copied = T::try_ref(src)?.deep_copy()?;
    *dst = copied.wrap();
    Ok(())
}

fn clear_erased<T: BuiltinType>(value: &mut Value) {
    match T::try_mut(value) {
        Ok(v) => v.clear(),
        // A slot of a foreign type is reset to this table's default, so the
        // caller still ends up with a released, default-initialized value.
        Err(_) => *value = T::default().wrap(),
    }
}

fn equal_erased<T: BuiltinType>(a: &Value, b: &Value) -> bool {
    match (T::try_ref(a), T::try_ref(b)) {
        (Ok(a), Ok(b)) => a.value_eq(b),
        _ => false,
    }
}

fn render_erased<T: BuiltinType>(value: &Value) -> String {
    match T::try_ref(value) {
        Ok(v) => v.render(),
        Err(_) => format!("<not a {}>", T::NAME),
    }
}

/// Placeholder type standing in for an unrecognized protocol type id.
///
/// Every fallible operation on it fails with [`ValueError::InvalidValue`];
/// the infallible ones are no-ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidType;

impl fmt::Display for InvalidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(invalid type)")
    }
}

impl BuiltinType for InvalidType {
    const TYPE_ID: TypeId = TypeId::Invalid;
    const NAME: &'static str = "Invalid";

    fn deep_copy(&self) -> ValueResult<Self> {
        Err(ValueError::invalid_value(
            "copy is not defined for the invalid type",
        ))
    }

    fn new_boxed() -> ValueResult<Box<Value>> {
        Err(ValueError::invalid_value(
            "allocation is not defined for the invalid type",
        ))
    }

    fn wrap(self) -> Value {
        Value::Invalid(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::Invalid(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::Invalid(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

/// Operation tables for every built-in type, indexed by `TypeId`
/// discriminant. Built at compile time; read-only for the life of the
/// process.
static TYPES: [TypeOps; 26] = [
    TypeOps::of::<InvalidType>(),
    TypeOps::of::<bool>(),
    TypeOps::of::<i8>(),
    TypeOps::of::<u8>(),
    TypeOps::of::<i16>(),
    TypeOps::of::<u16>(),
    TypeOps::of::<i32>(),
    TypeOps::of::<u32>(),
    TypeOps::of::<i64>(),
    TypeOps::of::<u64>(),
    TypeOps::of::<f32>(),
    TypeOps::of::<f64>(),
    TypeOps::of::<UaString>(),
    TypeOps::of::<DateTime>(),
    TypeOps::of::<Guid>(),
    TypeOps::of::<ByteString>(),
    TypeOps::of::<XmlElement>(),
    TypeOps::of::<NodeId>(),
    TypeOps::of::<ExpandedNodeId>(),
    TypeOps::of::<StatusCode>(),
    TypeOps::of::<QualifiedName>(),
    TypeOps::of::<LocalizedText>(),
    TypeOps::of::<ExtensionObject>(),
    TypeOps::of::<DataValue>(),
    TypeOps::of::<Variant>(),
    TypeOps::of::<DiagnosticInfo>(),
];

/// Look up the operation table for a type id.
#[must_use]
pub fn type_ops(id: TypeId) -> &'static TypeOps {
    &TYPES[id as usize]
}
