//! Variable-length buffer types: `UaString`, `ByteString`, `XmlElement`.
//!
//! The protocol distinguishes the *null* string (wire length -1, no buffer)
//! from the *empty* string (wire length 0). Both compare equal — equality
//! treats every value of logical length <= 0 as one class before any byte
//! comparison. `ByteString` shares the representation bit for bit and is
//! distinguished only by usage; `XmlElement` in turn wraps `ByteString`.

use std::fmt;

use base64::Engine as _;
use bytes::Bytes;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};

/// Protocol string: null, empty, or an owned byte buffer.
///
/// UTF-8 is the convention for text payloads but is not enforced at this
/// layer; the wire may carry arbitrary bytes.
#[derive(Debug, Clone, Default)]
pub struct UaString {
    data: Option<Bytes>,
}

impl UaString {
    /// The null string (wire length -1).
    #[must_use]
    pub const fn null() -> Self {
        Self { data: None }
    }

    /// The explicit empty string (wire length 0).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Some(Bytes::new()),
        }
    }

    /// Build from text, copying its bytes. Zero-length input yields the
    /// empty string, not the null string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            data: Some(Bytes::copy_from_slice(text.as_bytes())),
        }
    }

    /// Build from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            data: Some(bytes.into()),
        }
    }

    /// Whether this is the null string.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Logical length in bytes; 0 for both null and empty.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Bytes::len)
    }

    /// Whether the logical length is 0 (null or empty).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The signed wire-level length: -1 for null, otherwise the byte count.
    #[must_use]
    pub fn signed_len(&self) -> i32 {
        match &self.data {
            None => -1,
            Some(b) => b.len() as i32,
        }
    }

    /// Borrow the buffer; `None` for the null string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Borrow as UTF-8 text if the buffer is valid UTF-8.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.data.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }
}

impl PartialEq for UaString {
    fn eq(&self, other: &Self) -> bool {
        // Null and empty are one equivalence class.
        if self.is_empty() && other.is_empty() {
            return true;
        }
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for UaString {}

impl fmt::Display for UaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            None => f.write_str("(null)"),
            Some(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for UaString {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl BuiltinType for UaString {
    const TYPE_ID: TypeId = TypeId::String;
    const NAME: &'static str = "String";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            data: self
                .data
                .as_ref()
                .map(|b| Bytes::copy_from_slice(b)),
        })
    }

    fn wrap(self) -> Value {
        Value::String(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

/// Opaque byte sequence; same representation and equality as [`UaString`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteString(pub UaString);

impl ByteString {
    /// The null byte string.
    #[must_use]
    pub const fn null() -> Self {
        Self(UaString::null())
    }

    /// Build from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(UaString::from_bytes(bytes))
    }

    /// Whether this is the null byte string.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Logical length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the logical length is 0.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The signed wire-level length.
    #[must_use]
    pub fn signed_len(&self) -> i32 {
        self.0.signed_len()
    }

    /// Borrow the buffer; `None` for the null byte string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.0.as_bytes()
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_bytes() {
            None => f.write_str("(null)"),
            Some(b) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(b);
                write!(f, "b64:{encoded}")
            }
        }
    }
}

impl BuiltinType for ByteString {
    const TYPE_ID: TypeId = TypeId::ByteString;
    const NAME: &'static str = "ByteString";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self(self.0.deep_copy()?))
    }

    fn wrap(self) -> Value {
        Value::ByteString(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::ByteString(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::ByteString(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

/// XML payload carried as an opaque byte sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement(pub ByteString);

impl XmlElement {
    /// Build from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self(ByteString::from_bytes(bytes))
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_bytes() {
            None => f.write_str("(null)"),
            Some(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl BuiltinType for XmlElement {
    const TYPE_ID: TypeId = TypeId::XmlElement;
    const NAME: &'static str = "XmlElement";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self(self.0.deep_copy()?))
    }

    fn wrap(self) -> Value {
        Value::XmlElement(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::XmlElement(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::XmlElement(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}
