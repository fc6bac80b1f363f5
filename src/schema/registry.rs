//! Schema builder and field table

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DeclarationError;
use crate::field::{FieldDescriptor, Hyperparam, HyperparamInfo};
use crate::value::{FieldKind, FieldType};

/// Collects field declarations for one configuration type
///
/// Declarations are checked as they are added; the first failure is kept
/// and returned by [`SchemaBuilder::build`], later declarations are ignored.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    error: Option<DeclarationError>,
}

impl SchemaBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new(), error: None }
    }

    /// Start from every field of `parent`, in its order
    pub fn inherit(mut self, parent: &Schema) -> Self {
        for field in parent.fields() {
            self.push(field.clone());
        }
        self
    }

    /// Declare a field whose type comes from `T`
    pub fn field<T: FieldKind>(self, name: &str, hp: Hyperparam) -> Self {
        self.field_of_type(name, T::field_type(), hp)
    }

    /// Declare a field with an explicit type
    pub fn field_of_type(mut self, name: &str, field_type: FieldType, hp: Hyperparam) -> Self {
        if self.error.is_some() {
            return self;
        }
        match FieldDescriptor::declare(name, field_type, hp) {
            Ok(field) => self.push(field),
            Err(e) => self.error = Some(e),
        }
        self
    }

    fn push(&mut self, field: FieldDescriptor) {
        if self.error.is_some() {
            return;
        }
        if self.fields.iter().any(|f| f.name == field.name) {
            self.error = Some(DeclarationError::DuplicateField { field: field.name });
            return;
        }
        self.fields.push(field);
    }

    /// Finish the schema
    pub fn build(self) -> Result<Arc<Schema>, DeclarationError> {
        if let Some(e) = self.error {
            tracing::debug!(schema = %self.name, error = %e, "schema declaration rejected");
            return Err(e);
        }
        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        tracing::debug!(schema = %self.name, fields = self.fields.len(), "schema registered");
        Ok(Arc::new(Schema { name: self.name, fields: self.fields, index }))
    }
}

/// Immutable, ordered field table
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Snapshot of every field
    pub fn parameters(&self) -> HashMap<String, HyperparamInfo> {
        self.fields.iter().map(|f| (f.name.clone(), f.info())).collect()
    }

    /// Snapshots of the fields that carry a tuning signal, in declaration order
    ///
    /// A field qualifies when it is marked tunable, declares a search space,
    /// or declares explicit choices.
    pub fn tunable_params(&self) -> Vec<(String, HyperparamInfo)> {
        self.fields
            .iter()
            .filter(|f| f.is_tunable())
            .map(|f| (f.name.clone(), f.info()))
            .collect()
    }
}
