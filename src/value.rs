//! Scalar value model for hyperparameter fields
//!
//! Every field holds one of four scalar kinds. `HpValue::Null` only ever
//! appears in fields declared nullable, or transiently after a
//! non-validating update.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hyperparameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl HpValue {
    /// Scalar kind of this value, `None` for null
    pub fn kind(&self) -> Option<HpType> {
        match self {
            HpValue::Null => None,
            HpValue::Bool(_) => Some(HpType::Bool),
            HpValue::Int(_) => Some(HpType::Int),
            HpValue::Float(_) => Some(HpType::Float),
            HpValue::Str(_) => Some(HpType::Str),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, HpValue::Null)
    }

    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            HpValue::Float(v) => Some(*v),
            HpValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            HpValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HpValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HpValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Renders the value the way it is written on a command line.
impl fmt::Display for HpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HpValue::Null => write!(f, "null"),
            HpValue::Bool(b) => write!(f, "{b}"),
            HpValue::Int(v) => write!(f, "{v}"),
            HpValue::Float(v) => write!(f, "{v}"),
            HpValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for HpValue {
    fn from(v: bool) -> Self {
        HpValue::Bool(v)
    }
}

impl From<i64> for HpValue {
    fn from(v: i64) -> Self {
        HpValue::Int(v)
    }
}

impl From<i32> for HpValue {
    fn from(v: i32) -> Self {
        HpValue::Int(i64::from(v))
    }
}

impl From<f64> for HpValue {
    fn from(v: f64) -> Self {
        HpValue::Float(v)
    }
}

impl From<&str> for HpValue {
    fn from(v: &str) -> Self {
        HpValue::Str(v.to_string())
    }
}

impl From<String> for HpValue {
    fn from(v: String) -> Self {
        HpValue::Str(v)
    }
}

impl<T: Into<HpValue>> From<Option<T>> for HpValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(HpValue::Null, Into::into)
    }
}

/// Scalar kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HpType {
    Int,
    Float,
    Str,
    Bool,
}

impl HpType {
    pub fn name(self) -> &'static str {
        match self {
            HpType::Int => "int",
            HpType::Float => "float",
            HpType::Str => "str",
            HpType::Bool => "bool",
        }
    }

    /// Parse a command-line token into a value of this kind
    pub fn parse(self, raw: &str) -> Option<HpValue> {
        match self {
            HpType::Int => raw.trim().parse().ok().map(HpValue::Int),
            HpType::Float => raw.trim().parse().ok().map(HpValue::Float),
            HpType::Str => Some(HpValue::Str(raw.to_string())),
            HpType::Bool => match raw.trim().to_lowercase().as_str() {
                "true" => Some(HpValue::Bool(true)),
                "false" => Some(HpValue::Bool(false)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for HpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a field: a scalar kind, optionally nullable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    pub kind: HpType,
    pub nullable: bool,
}

impl FieldType {
    pub const fn new(kind: HpType) -> Self {
        Self { kind, nullable: false }
    }

    pub const fn nullable(kind: HpType) -> Self {
        Self { kind, nullable: true }
    }

    pub const fn int() -> Self {
        Self::new(HpType::Int)
    }

    pub const fn float() -> Self {
        Self::new(HpType::Float)
    }

    pub const fn string() -> Self {
        Self::new(HpType::Str)
    }

    pub const fn boolean() -> Self {
        Self::new(HpType::Bool)
    }

    pub fn is_bool(&self) -> bool {
        self.kind == HpType::Bool
    }

    /// Strict instance check, no widening
    pub fn is_instance(&self, value: &HpValue) -> bool {
        match value.kind() {
            None => self.nullable,
            Some(kind) => kind == self.kind,
        }
    }

    /// Accept `value` for this type, widening ints to floats.
    ///
    /// Returns the value as it should be stored, or `None` on mismatch.
    pub fn coerce(&self, value: &HpValue) -> Option<HpValue> {
        match (self.kind, value) {
            (_, HpValue::Null) if self.nullable => Some(HpValue::Null),
            (HpType::Float, HpValue::Int(v)) => Some(HpValue::Float(*v as f64)),
            _ if self.is_instance(value) && !value.is_null() => Some(value.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Optional[{}]", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Rust types that can back a hyperparameter field
///
/// This is the static-annotation half of a declaration: `field::<f64>(..)`
/// declares a float field, `field::<Option<String>>(..)` a nullable string.
pub trait FieldKind: Sized {
    fn field_type() -> FieldType;

    /// Read a stored value back as `Self`
    fn from_value(value: &HpValue) -> Option<Self>;
}

impl FieldKind for i64 {
    fn field_type() -> FieldType {
        FieldType::int()
    }

    fn from_value(value: &HpValue) -> Option<Self> {
        value.as_int()
    }
}

impl FieldKind for f64 {
    fn field_type() -> FieldType {
        FieldType::float()
    }

    fn from_value(value: &HpValue) -> Option<Self> {
        value.as_float()
    }
}

impl FieldKind for String {
    fn field_type() -> FieldType {
        FieldType::string()
    }

    fn from_value(value: &HpValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FieldKind for bool {
    fn field_type() -> FieldType {
        FieldType::boolean()
    }

    fn from_value(value: &HpValue) -> Option<Self> {
        value.as_bool()
    }
}

impl<T: FieldKind> FieldKind for Option<T> {
    fn field_type() -> FieldType {
        FieldType::nullable(T::field_type().kind)
    }

    fn from_value(value: &HpValue) -> Option<Self> {
        match value {
            HpValue::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
