//! Locale-tagged text.

use std::fmt;

use crate::core::kind::TypeId;
use crate::core::ops::BuiltinType;
use crate::core::value::Value;
use crate::error::{ValueError, ValueResult};
use crate::scalar::UaString;

/// A text string paired with the locale it is written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizedText {
    pub locale: UaString,
    pub text: UaString,
}

impl LocalizedText {
    /// Build from parts, copying both strings.
    #[must_use]
    pub fn new(locale: &str, text: &str) -> Self {
        Self {
            locale: UaString::from_text(locale),
            text: UaString::from_text(text),
        }
    }

    /// English-locale text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new("en", text)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.locale.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "[{}] {}", self.locale, self.text)
        }
    }
}

impl BuiltinType for LocalizedText {
    const TYPE_ID: TypeId = TypeId::LocalizedText;
    const NAME: &'static str = "LocalizedText";

    fn deep_copy(&self) -> ValueResult<Self> {
        Ok(Self {
            locale: self.locale.deep_copy()?,
            text: self.text.deep_copy()?,
        })
    }

    fn wrap(self) -> Value {
        Value::LocalizedText(self)
    }

    fn try_ref(value: &Value) -> ValueResult<&Self> {
        match value {
            Value::LocalizedText(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }

    fn try_mut(value: &mut Value) -> ValueResult<&mut Self> {
        match value {
            Value::LocalizedText(v) => Ok(v),
            other => Err(ValueError::type_mismatch(Self::NAME, other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_round_trips_both_strings() {
        let lt = LocalizedText::new("de", "Durchfluss");
        let copy = lt.deep_copy().unwrap();
        assert_eq!(copy, lt);
    }

    #[test]
    fn from_text_defaults_to_english() {
        let lt = LocalizedText::from_text("Flow rate");
        assert_eq!(lt.locale.as_text(), Some("en"));
        assert_eq!(lt.to_string(), "[en] Flow rate");
    }

    #[test]
    fn clear_releases_both_strings() {
        let mut lt = LocalizedText::new("en", "x");
        lt.clear();
        assert!(lt.locale.is_null());
        assert!(lt.text.is_null());
    }
}
