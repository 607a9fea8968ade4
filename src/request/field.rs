//! Caller-supplied payload fields.
//!
//! Fields are accepted as any JSON value and type-checked during validation,
//! so a mistyped field fails that field (or that batch item) instead of the
//! whole body. JSON `null` reads the same as an absent field.

use serde::Deserialize;
use serde_json::Value;

/// A payload field as received
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawField(Option<Value>);

/// What a [`RawField`] holds, seen as text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldText<'a> {
    Missing,
    Text(&'a str),
    /// Present but not a string
    Mistyped(&'a Value),
}

impl RawField {
    pub fn missing() -> Self {
        Self(None)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self(Some(Value::String(value.into())))
    }

    pub fn json(value: Value) -> Self {
        match value {
            Value::Null => Self(None),
            value => Self(Some(value)),
        }
    }

    pub fn as_text(&self) -> FieldText<'_> {
        match &self.0 {
            None | Some(Value::Null) => FieldText::Missing,
            Some(Value::String(s)) => FieldText::Text(s),
            Some(other) => FieldText::Mistyped(other),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.as_text(), FieldText::Missing)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}
