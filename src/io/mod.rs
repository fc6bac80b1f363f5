//! Configuration files
//!
//! Instances are read from and written to flat YAML or JSON mappings of
//! field name to value. The format follows the file extension.

mod format;
mod load;
mod save;

pub use format::ConfigFormat;
pub use load::load_values;
pub use save::save;
