//! Output records of a decomposition: one [`PathValue`] per JSON leaf.

use serde::{Serialize, Serializer};
use std::fmt;

/// A leaf value, typed strictly by the JSON runtime type it came from.
///
/// There is no integer variant: every JSON number is narrowed to `f32`.
/// Magnitudes beyond `f32::MAX` become infinite and serialize as `"inf"`/`"-inf"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TypedValue {
    String(String),
    Bool(bool),
    Float(#[serde(serialize_with = "serialize_float")] f32),
}

/// JSON has no infinity or NaN; spell them out instead of letting them become `null`.
fn serialize_float<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f32(*value)
    } else if value.is_nan() {
        serializer.serialize_str("nan")
    } else if value.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

impl TypedValue {
    /// Short lowercase name of the variant, matching the serialized `type` tag.
    pub fn value_type(&self) -> &'static str {
        match self {
            TypedValue::String(_) => "string",
            TypedValue::Bool(_) => "bool",
            TypedValue::Float(_) => "float",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            TypedValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<f32> for TypedValue {
    fn from(f: f32) -> Self {
        TypedValue::Float(f)
    }
}

/// Strings are rendered quoted so that `"true"` and `true` stay distinguishable.
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => write!(f, "{s:?}"),
            TypedValue::Bool(b) => write!(f, "{b}"),
            TypedValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A flattened leaf: its location in the source tree and its typed value.
///
/// Paths use `/key` for object members and `[i]` for array elements,
/// e.g. `/interfaces/interface[0]/name`. A root scalar has the empty path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathValue {
    pub path: String,
    #[serde(flatten)]
    pub value: TypedValue,
}

impl PathValue {
    pub fn new(path: impl Into<String>, value: impl Into<TypedValue>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path, self.value)
    }
}
