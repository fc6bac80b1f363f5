//! Error types for schema declaration, value validation and the CLI boundary

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::value::{FieldType, HpValue};

/// Result type alias for hyperparams operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed field declaration, raised once when a schema is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeclarationError {
    #[error("Default for {field} must be of type {expected}, got {value:?}")]
    DefaultTypeMismatch {
        field: String,
        expected: FieldType,
        value: HpValue,
    },

    #[error("Choice {value:?} for {field} does not match declared type {expected}")]
    ChoiceTypeMismatch {
        field: String,
        expected: FieldType,
        value: HpValue,
    },

    #[error("Default {value} for {field} is not one of the declared choices")]
    DefaultNotInChoices { field: String, value: HpValue },

    #[error("Field {field} of non-nullable type {field_type} cannot default to null")]
    NullDefault { field: String, field_type: FieldType },

    #[error("Boolean field {field} cannot be nullable")]
    NullableBool { field: String },

    #[error("Boolean field {field} cannot declare choices")]
    BoolChoices { field: String },

    #[error("Field {field} declares an empty choice list")]
    EmptyChoices { field: String },

    #[error("Field {field} is declared more than once")]
    DuplicateField { field: String },

    #[error("Invalid field name: {field:?} (use ASCII letters, digits and underscores)")]
    InvalidName { field: String },
}

/// Why a single field value was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// Value is not an instance of the declared type
    TypeMismatch { expected: FieldType },
    /// Value is not a member of the declared choices
    NotInChoices { choices: Vec<HpValue> },
    /// No field of that name exists in the schema
    UnknownField,
    /// Required field was given no value
    Missing,
    /// A custom field check rejected the value
    Check(String),
}

/// A rejected value for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub value: HpValue,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, value: HpValue, kind: FieldErrorKind) -> Self {
        Self { field: field.into(), value, kind }
    }

    pub fn unknown(field: impl Into<String>, value: HpValue) -> Self {
        Self::new(field, value, FieldErrorKind::UnknownField)
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, HpValue::Null, FieldErrorKind::Missing)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::TypeMismatch { expected } => {
                write!(f, "{}: expected {expected}, got {:?}", self.field, self.value)
            }
            FieldErrorKind::NotInChoices { choices } => {
                let listed: Vec<String> = choices.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{}: {} must be one of [{}]",
                    self.field,
                    self.value,
                    listed.join(", ")
                )
            }
            FieldErrorKind::UnknownField => write!(f, "{}: no such field", self.field),
            FieldErrorKind::Missing => write!(f, "{}: field required", self.field),
            FieldErrorKind::Check(message) => write!(f, "{}: {message}", self.field),
        }
    }
}

/// One or more rejected field values
///
/// Bulk operations report every failing field, in the order the fields were
/// given.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation error(s) for {schema}: {}", .errors.len(), join_errors(.errors))]
pub struct ValidationError {
    pub schema: String,
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ValidationError {
    pub fn new(schema: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self { schema: schema.into(), errors }
    }

    /// Names of the offending fields
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// True when any error refers to a field outside the schema
    pub fn has_unknown_field(&self) -> bool {
        self.errors.iter().any(|e| e.kind == FieldErrorKind::UnknownField)
    }
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
