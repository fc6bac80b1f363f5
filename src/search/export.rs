//! Export of an instance's tunable fields

use std::collections::HashMap;

use super::space::{ParamSpace, SearchSpace, SpaceEntry};
use crate::field::FieldDescriptor;
use crate::instance::Hyperparams;
use crate::value::HpValue;

/// Conversion of a configuration into a search-engine description
pub trait SearchSpaceExport {
    /// Search space over the tunable fields, in declaration order
    ///
    /// Each field uses, by priority: its declared search space, a uniform
    /// choice over its (effective) choices, or a pinned value. The pinned
    /// value is the current one when `use_current_values` is set, the
    /// default otherwise. Fields with nothing to pin are left out.
    fn param_space(&self, use_current_values: bool) -> ParamSpace;

    /// Starting point for the search over the tunable fields
    ///
    /// Defaults, or current values when `use_current_values` is set. Fields
    /// without a value are left out.
    fn best_values(&self, use_current_values: bool) -> HashMap<String, HpValue>;
}

impl Hyperparams {
    fn tunable_fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &HpValue)> {
        self.schema()
            .fields()
            .iter()
            .zip(self.iter())
            .filter(|(field, _)| field.is_tunable())
            .map(|(field, (_, value))| (field, value))
    }
}

fn seed_value(field: &FieldDescriptor, current: &HpValue, use_current: bool) -> Option<HpValue> {
    let value = if use_current { Some(current) } else { field.default.as_ref() };
    value.filter(|v| !v.is_null()).cloned()
}

impl SearchSpaceExport for Hyperparams {
    fn param_space(&self, use_current_values: bool) -> ParamSpace {
        let mut space = ParamSpace::new();
        for (field, current) in self.tunable_fields() {
            let entry = if let Some(search) = &field.search_space {
                SpaceEntry::Search(search.clone())
            } else if let Some(values) = field.effective_choices() {
                SpaceEntry::Search(SearchSpace::Choice { values })
            } else if let Some(value) = seed_value(field, current, use_current_values) {
                SpaceEntry::Fixed(value)
            } else {
                continue;
            };
            space.insert(&field.name, entry);
        }
        tracing::debug!(
            schema = self.schema().name(),
            entries = space.len(),
            "exported parameter space"
        );
        space
    }

    fn best_values(&self, use_current_values: bool) -> HashMap<String, HpValue> {
        self.tunable_fields()
            .filter_map(|(field, current)| {
                seed_value(field, current, use_current_values).map(|v| (field.name.clone(), v))
            })
            .collect()
    }
}
