//! Namespace-qualified names.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::UaString;

/// A name qualified by a namespace index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualifiedName {
    pub namespace_index: u16,
    pub name: UaString,
}

impl QualifiedName {
    /// Build from parts, copying the text.
    #[must_use]
    pub fn new(namespace_index: u16, name: &str) -> Self {
        Self {
            namespace_index,
            name: UaString::from_text(name),
        }
    }

    /// Name in namespace 0.
    #[must_use]
    pub fn from_text(name: &str) -> Self {
        Self::new(0, name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_index, self.name)
    }
}

impl BuiltinType for QualifiedName {
    const TYPE_ID: TypeId = TypeId::QualifiedName;
    const NAME: &'static str = "QualifiedName";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            namespace_index: self.namespace_index,
            name: self.name.deep_copy()?,
        })
    }

    fn wrap(self) -> Value {
        Value::QualifiedName(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::QualifiedName(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::QualifiedName(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}
