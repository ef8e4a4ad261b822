//! Extension objects: structured values carried as an encoded body.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::identifier::NodeId;
use crate::scalar::ByteString;

/// How an extension object's body is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// No body is present.
    #[default]
    NoBody,
    /// The body is an opaque binary-encoded byte string.
    ByteString,
    /// The body is an XML document.
    Xml,
}

/// A structured value of some (possibly unknown) type, carried opaque:
/// the type id names the schema, the body holds the encoded payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionObject {
    pub type_id: NodeId,
    pub encoding: BodyEncoding,
    pub body: ByteString,
}

impl ExtensionObject {
    /// An object with a binary body.
    #[must_use]
    pub fn binary(type_id: NodeId, body: ByteString) -> Self {
        Self {
            type_id,
            encoding: BodyEncoding::ByteString,
            body,
        }
    }
}

impl fmt::Display for ExtensionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtensionObject{{{}, {:?}, {} bytes}}",
            self.type_id,
            self.encoding,
            self.body.len()
        )
    }
}

impl BuiltinType for ExtensionObject {
    const TYPE_ID: TypeId = TypeId::ExtensionObject;
    const NAME: &'static str = "ExtensionObject";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            type_id: self.type_id.deep_copy()?,
            encoding: self.encoding,
            body: self.body.deep_copy()?,
        })
    }

    fn wrap(self) -> Value {
        Value::ExtensionObject(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::ExtensionObject(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::ExtensionObject(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}
