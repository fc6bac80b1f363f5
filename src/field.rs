//! Field declarations
//!
//! A field is declared with [`Hyperparam`] and given its type by the schema
//! builder. The builder turns the pair into a [`FieldDescriptor`] after
//! checking it (see [`FieldDescriptor::declare`]).
//!
//! # Example
//!
//! ```ignore
//! use hyperparams::{Hyperparam, Schema};
//!
//! let schema = Schema::builder("Training")
//!     .field::<f64>("lr", Hyperparam::new("Learning Rate").default(0.1))
//!     .field::<String>(
//!         "mode",
//!         Hyperparam::new("Training mode")
//!             .default("backprop")
//!             .choices(["backprop", "sazil", "custom"]),
//!     )
//!     .build()?;
//! ```

use serde::Serialize;

use crate::error::DeclarationError;
use crate::search::SearchSpace;
use crate::value::{FieldType, HpValue};

/// Custom check run after type and choice validation
pub type FieldCheck = fn(&HpValue) -> Result<(), String>;

/// Field declaration, before its type is known
#[derive(Debug, Clone, Default)]
pub struct Hyperparam {
    description: String,
    default: Option<HpValue>,
    choices: Option<Vec<HpValue>>,
    tunable: bool,
    search_space: Option<SearchSpace>,
    check: Option<FieldCheck>,
}

impl Hyperparam {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), ..Default::default() }
    }

    /// Set the default; `HpValue::Null` declares a null default
    pub fn default(mut self, value: impl Into<HpValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<HpValue>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn tunable(mut self) -> Self {
        self.tunable = true;
        self
    }

    /// Attach an explicit search space; implies `tunable`
    pub fn search_space(mut self, space: SearchSpace) -> Self {
        self.search_space = Some(space);
        self.tunable = true;
        self
    }

    pub fn check(mut self, check: FieldCheck) -> Self {
        self.check = Some(check);
        self
    }
}

/// Checked field declaration
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub description: String,
    pub field_type: FieldType,
    /// `None` when no default was declared
    pub default: Option<HpValue>,
    /// Explicitly declared choices
    pub choices: Option<Vec<HpValue>>,
    pub tunable: bool,
    pub search_space: Option<SearchSpace>,
    pub check: Option<FieldCheck>,
}

impl FieldDescriptor {
    /// Build a descriptor, rejecting inconsistent declarations
    pub fn declare(
        name: &str,
        field_type: FieldType,
        hp: Hyperparam,
    ) -> Result<Self, DeclarationError> {
        let field = || name.to_string();

        if !is_valid_name(name) {
            return Err(DeclarationError::InvalidName { field: field() });
        }

        if field_type.is_bool() {
            if field_type.nullable {
                return Err(DeclarationError::NullableBool { field: field() });
            }
            if hp.choices.is_some() {
                return Err(DeclarationError::BoolChoices { field: field() });
            }
        }

        if let Some(default) = &hp.default {
            if default.is_null() && !field_type.nullable {
                return Err(DeclarationError::NullDefault { field: field(), field_type });
            }
            if !field_type.is_instance(default) {
                return Err(DeclarationError::DefaultTypeMismatch {
                    field: field(),
                    expected: field_type,
                    value: default.clone(),
                });
            }
        }

        if let Some(choices) = &hp.choices {
            if choices.is_empty() {
                return Err(DeclarationError::EmptyChoices { field: field() });
            }
            // Choices are concrete values; a null choice is never valid.
            if let Some(bad) = choices
                .iter()
                .find(|c| c.is_null() || !field_type.is_instance(c))
            {
                return Err(DeclarationError::ChoiceTypeMismatch {
                    field: field(),
                    expected: field_type,
                    value: bad.clone(),
                });
            }
            if let Some(default) = hp.default.as_ref().filter(|d| !d.is_null()) {
                if !choices.contains(default) {
                    return Err(DeclarationError::DefaultNotInChoices {
                        field: field(),
                        value: default.clone(),
                    });
                }
            }
        }

        Ok(Self {
            name: field(),
            description: hp.description,
            field_type,
            default: hp.default,
            choices: hp.choices,
            tunable: hp.tunable,
            search_space: hp.search_space,
            check: hp.check,
        })
    }

    pub fn required(&self) -> bool {
        self.default.is_none()
    }

    pub fn is_bool(&self) -> bool {
        self.field_type.is_bool()
    }

    pub fn default_is_null(&self) -> bool {
        matches!(self.default, Some(HpValue::Null))
    }

    /// Declared choices, or `[false, true]` for boolean fields
    pub fn effective_choices(&self) -> Option<Vec<HpValue>> {
        if self.is_bool() {
            return Some(vec![HpValue::Bool(false), HpValue::Bool(true)]);
        }
        self.choices.clone()
    }

    /// True if the field belongs in a search space
    pub fn is_tunable(&self) -> bool {
        self.tunable || self.search_space.is_some() || self.choices.is_some()
    }

    /// Command-line flag, underscores become hyphens
    pub fn flag(&self) -> String {
        format!("--{}", self.name.replace('_', "-"))
    }

    /// Disabling flag of a boolean field
    pub fn negated_flag(&self) -> String {
        format!("--no-{}", self.name.replace('_', "-"))
    }

    pub fn info(&self) -> HyperparamInfo {
        HyperparamInfo {
            description: self.description.clone(),
            field_type: self.field_type,
            default: self.default.clone(),
            required: self.required(),
            tunable: self.is_tunable(),
            choices: self.effective_choices(),
            search_space: self.search_space.clone(),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Read-only snapshot of a field declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperparamInfo {
    pub description: String,
    pub field_type: FieldType,
    pub default: Option<HpValue>,
    pub required: bool,
    pub tunable: bool,
    pub choices: Option<Vec<HpValue>>,
    pub search_space: Option<SearchSpace>,
}
