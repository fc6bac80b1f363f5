//! Field value validation logic

use crate::error::{FieldError, FieldErrorKind, ValidationError};
use crate::field::FieldDescriptor;
use crate::schema::Schema;
use crate::value::HpValue;

/// Validate one value against its field declaration
///
/// Checks, in order:
/// - the value is an instance of the declared type (ints widen to floats)
/// - a non-null value is one of the declared choices
/// - the custom field check, if any, accepts it
///
/// Returns the value as it should be stored.
pub fn validate_value(field: &FieldDescriptor, value: &HpValue) -> Result<HpValue, FieldError> {
    let reject = |kind| FieldError::new(&field.name, value.clone(), kind);

    let value = field
        .field_type
        .coerce(value)
        .ok_or_else(|| reject(FieldErrorKind::TypeMismatch { expected: field.field_type }))?;

    if let Some(choices) = &field.choices {
        if !value.is_null() && !choices.contains(&value) {
            return Err(reject(FieldErrorKind::NotInChoices { choices: choices.clone() }));
        }
    }

    if let Some(check) = field.check {
        check(&value).map_err(|message| reject(FieldErrorKind::Check(message)))?;
    }

    Ok(value)
}

/// Validate a batch of named values against `schema`
///
/// Every failure is collected; on success the checked values are returned
/// with their field index, in input order.
pub fn validate_assignments<'a, I>(
    schema: &Schema,
    assignments: I,
) -> Result<Vec<(usize, HpValue)>, ValidationError>
where
    I: IntoIterator<Item = (&'a str, &'a HpValue)>,
{
    let mut accepted = Vec::new();
    let mut errors = Vec::new();

    for (name, value) in assignments {
        let Some(index) = schema.index_of(name) else {
            errors.push(FieldError::unknown(name, value.clone()));
            continue;
        };
        match validate_value(&schema.fields()[index], value) {
            Ok(value) => accepted.push((index, value)),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(accepted)
    } else {
        tracing::warn!(
            schema = schema.name(),
            failures = errors.len(),
            "rejected hyperparameter values"
        );
        Err(ValidationError::new(schema.name(), errors))
    }
}
