//! Configuration instances
//!
//! A [`Hyperparams`] value holds one value per schema field, in declaration
//! order. Construction and [`Hyperparams::set`] always validate; the update
//! methods validate on request.

mod render;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{FieldError, Result, ValidationError};
use crate::field::HyperparamInfo;
use crate::schema::Schema;
use crate::validate::validate_assignments;
use crate::value::{FieldKind, HpValue};

/// One configuration: a value for every field of its schema
#[derive(Debug, Clone)]
pub struct Hyperparams {
    schema: Arc<Schema>,
    values: Vec<HpValue>,
}

/// Field-level differences: name -> (this value, other value)
///
/// A side is `None` when that instance has no such field.
pub type Diff = HashMap<String, (Option<HpValue>, Option<HpValue>)>;

impl Hyperparams {
    /// Build a validated instance from explicit values plus defaults
    ///
    /// Fails listing every unknown name, rejected value and required field
    /// left without a value.
    pub fn new<I, K, V>(
        schema: &Arc<Schema>,
        values: I,
    ) -> std::result::Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HpValue>,
    {
        let given = collect_changes(values);
        let (accepted, mut errors) =
            match validate_assignments(schema, given.iter().map(|(k, v)| (k.as_str(), v))) {
                Ok(accepted) => (accepted, Vec::new()),
                Err(e) => (Vec::new(), e.errors),
            };

        let mut slots: Vec<Option<HpValue>> =
            schema.fields().iter().map(|f| f.default.clone()).collect();
        for (index, value) in accepted {
            slots[index] = Some(value);
        }

        let mut values = Vec::with_capacity(slots.len());
        for (field, slot) in schema.fields().iter().zip(slots) {
            if slot.is_none() && !given.iter().any(|(k, _)| *k == field.name) {
                errors.push(FieldError::missing(&field.name));
            }
            values.push(slot.unwrap_or(HpValue::Null));
        }

        if !errors.is_empty() {
            return Err(ValidationError::new(schema.name(), errors));
        }
        Ok(Self { schema: Arc::clone(schema), values })
    }

    /// Instance holding only defaults
    pub fn with_defaults(schema: &Arc<Schema>) -> std::result::Result<Self, ValidationError> {
        Self::new(schema, Vec::<(String, HpValue)>::new())
    }

    /// Build a validated instance from a YAML or JSON value file
    pub fn from_file(schema: &Arc<Schema>, path: &Path) -> Result<Self> {
        let values = crate::io::load_values(path)?;
        Ok(Self::new(schema, values)?)
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get_value(&self, name: &str) -> Option<&HpValue> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    /// Typed read; `None` if the field is absent or holds another type
    pub fn get<T: FieldKind>(&self, name: &str) -> Option<T> {
        self.get_value(name).and_then(T::from_value)
    }

    /// Field values in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HpValue)> {
        self.schema.fields().iter().map(|f| f.name.as_str()).zip(self.values.iter())
    }

    /// Assign one field, validating it first
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<HpValue>,
    ) -> std::result::Result<(), ValidationError> {
        let value = value.into();
        let checked = validate_assignments(&self.schema, [(name, &value)])?;
        for (index, value) in checked {
            self.values[index] = value;
        }
        Ok(())
    }

    /// Re-check every field against the schema
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_assignments(&self.schema, self.iter()).map(|_| ())
    }

    /// Mutate in place (`inplace = true`)
    ///
    /// With `validate`, the changes are all applied or, on any failure,
    /// none are. Without it values are stored as given and unknown names are
    /// ignored.
    pub fn update<I, K, V>(
        &mut self,
        changes: I,
        validate: bool,
    ) -> std::result::Result<&mut Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HpValue>,
    {
        let changes = collect_changes(changes);
        if validate {
            let checked = validate_assignments(
                &self.schema,
                changes.iter().map(|(k, v)| (k.as_str(), v)),
            )?;
            for (index, value) in checked {
                self.values[index] = value;
            }
        } else {
            for (name, value) in changes {
                match self.schema.index_of(&name) {
                    Some(index) => self.values[index] = value,
                    None => {
                        tracing::debug!(field = %name, "ignoring unknown field in unchecked update");
                    }
                }
            }
        }
        tracing::debug!(schema = self.schema.name(), validate, "applied update");
        Ok(self)
    }

    /// Copy with changes applied (`inplace = false`); `self` is untouched
    pub fn updated<I, K, V>(
        &self,
        changes: I,
        validate: bool,
    ) -> std::result::Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<HpValue>,
    {
        let mut copy = self.clone();
        copy.update(changes, validate)?;
        Ok(copy)
    }

    /// Fields whose values differ, over the union of both field sets
    pub fn diff(&self, other: &Hyperparams) -> Diff {
        let mut diff = Diff::new();
        for (name, mine) in self.iter() {
            let theirs = other.get_value(name);
            if !theirs.is_some_and(|t| same_value(t, mine)) {
                diff.insert(name.to_string(), (Some(mine.clone()), theirs.cloned()));
            }
        }
        for (name, theirs) in other.iter() {
            if !self.schema.contains(name) {
                diff.insert(name.to_string(), (None, Some(theirs.clone())));
            }
        }
        diff
    }

    /// Snapshot of every field
    pub fn parameters(&self) -> HashMap<String, HyperparamInfo> {
        self.schema.parameters()
    }

    /// Snapshots of the tunable fields, in declaration order
    pub fn tunable_params(&self) -> Vec<(String, HyperparamInfo)> {
        self.schema.tunable_params()
    }
}

impl PartialEq for Hyperparams {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.diff(other).is_empty()
    }
}

/// Value equality where a NaN float equals itself
fn same_value(a: &HpValue, b: &HpValue) -> bool {
    match (a, b) {
        (HpValue::Float(x), HpValue::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}

/// Normalize a change set; a repeated name keeps its last value
fn collect_changes<I, K, V>(changes: I) -> Vec<(String, HpValue)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<HpValue>,
{
    let mut out: Vec<(String, HpValue)> = Vec::new();
    for (name, value) in changes {
        let name = name.into();
        let value = value.into();
        match out.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => out.push((name, value)),
        }
    }
    out
}
