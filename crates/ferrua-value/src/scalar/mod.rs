//! Scalar built-in types.
//!
//! The fixed-width integers, floats and booleans are plain Rust primitives;
//! their lifecycle contract is implemented here in one macro sweep (copy is
//! bitwise, release is a no-op). The buffer-backed and 128-bit scalars live
//! in their own modules.

pub mod guid;
pub mod status;
pub mod string;

pub use guid::Guid;
pub use status::StatusCode;
pub use string::{ByteString, UaString, XmlElement};

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};

macro_rules! impl_builtin_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl BuiltinType for $ty {
            const TYPE_ID: TypeId = TypeId::$variant;
            const NAME: &'static str = TypeId::$variant.name();

            fn deep_copy(&self) -> ValueResult<Self> {
                Ok(*self)
            }

            fn wrap(self) -> Value {
                Value::$variant(self)
            }

            fn try_ref(value: &Value) -> ValueResult<&Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
                }
            }

            fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
                }
            }
        }
    )*};
}

impl_builtin_scalar! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
}

pub(crate) use impl_builtin_scalar;
