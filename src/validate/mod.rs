//! Value validation
//!
//! One validator serves every field: it dispatches on the declared type and
//! choices stored in the field table.

mod validator;

#[cfg(test)]
mod proptests;

pub use validator::{validate_assignments, validate_value};
