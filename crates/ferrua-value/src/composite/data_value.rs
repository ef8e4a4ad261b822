//! Attribute values with quality and timestamps.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::StatusCode;
use crate::temporal::DateTime;
use crate::variant::Variant;

/// A variant paired with the status and timestamps of the read that
/// produced it. The encoding mask records which members are meaningful.
#[derive(Debug, Default, PartialEq)]
pub struct DataValue {
    /// One bit per optional member; see the `MASK_*` constants.
    pub encoding_mask: u8,
    pub value: Variant,
    pub status: StatusCode,
    pub source_timestamp: DateTime,
    /// Sub-tick resolution of `source_timestamp`, in 10-picosecond units.
    pub source_picoseconds: i16,
    pub server_timestamp: DateTime,
    /// Sub-tick resolution of `server_timestamp`, in 10-picosecond units.
    pub server_picoseconds: i16,
}

impl DataValue {
    pub const MASK_VALUE: u8 = 0x01;
    pub const MASK_STATUS: u8 = 0x02;
    pub const MASK_SOURCE_TIMESTAMP: u8 = 0x04;
    pub const MASK_SERVER_TIMESTAMP: u8 = 0x08;
    pub const MASK_SOURCE_PICOSECONDS: u8 = 0x10;
    pub const MASK_SERVER_PICOSECONDS: u8 = 0x20;

    /// Whether the mask marks a member as present.
    #[inline]
    #[must_use]
    pub fn has(&self, mask_bit: u8) -> bool {
        self.encoding_mask & mask_bit != 0
    }

    /// Wrap a variant with the value bit set and everything else default.
    #[must_use]
    pub fn from_variant(value: Variant) -> Self {
        Self {
            encoding_mask: Self::MASK_VALUE,
            value,
            ..Self::default()
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataValue{{mask=0x{:02x}", self.encoding_mask)?;
        if self.has(Self::MASK_VALUE) {
            write!(f, ", value={}", self.value)?;
        }
        if self.has(Self::MASK_STATUS) {
            write!(f, ", status={}", self.status)?;
        }
        if self.has(Self::MASK_SOURCE_TIMESTAMP) {
            write!(f, ", sourceTimestamp={}", self.source_timestamp)?;
        }
        if self.has(Self::MASK_SERVER_TIMESTAMP) {
            write!(f, ", serverTimestamp={}", self.server_timestamp)?;
        }
        f.write_str("}")
    }
}

impl BuiltinType for DataValue {
    const TYPE_ID: TypeId = TypeId::DataValue;
    const NAME: &'static str = "DataValue";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            encoding_mask: self.encoding_mask,
            value: self.value.deep_copy()?,
            status: self.status,
            source_timestamp: self.source_timestamp,
            source_picoseconds: self.source_picoseconds,
            server_timestamp: self.server_timestamp,
            server_picoseconds: self.server_picoseconds,
        })
    }

    fn wrap(self) -> Value {
        Value::DataValue(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::DataValue(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::DataValue(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}
