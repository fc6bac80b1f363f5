//! Schema registry
//!
//! A schema is the ordered field table of one configuration type. It is
//! built once through [`SchemaBuilder`], which checks every declaration, and
//! is read-only afterwards. Instances share it through an `Arc`.

mod registry;


pub use registry::{Schema, SchemaBuilder};
