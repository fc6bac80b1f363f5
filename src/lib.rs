//! Declarative hyperparameter schemas.
//!
//! A [`Schema`] declares named, typed fields with descriptions, defaults,
//! choices and optional search spaces. From one declaration the crate
//! provides:
//! - Validated configuration instances ([`Hyperparams`]) with typed access
//! - Copy or in-place updates, optionally validated, and diffs
//! - Command-line synthesis on top of `clap`, with `--flag`/`--no-flag`
//!   pairs for boolean fields
//! - Export of the tunable fields as a search space
//! - JSON and YAML rendering and value files
//!
//! # Example
//!
//! ```ignore
//! use hyperparams::{Hyperparam, Hyperparams, Schema};
//!
//! let schema = Schema::builder("MyTest")
//!     .field::<f64>("lr", Hyperparam::new("Learning Rate").default(0.1))
//!     .field::<String>(
//!         "mode",
//!         Hyperparam::new("Training mode")
//!             .default("backprop")
//!             .choices(["backprop", "sazil"]),
//!     )
//!     .build()?;
//!
//! let params = Hyperparams::new(&schema, [("lr", 0.8)])?;
//! assert_eq!(params.get::<f64>("lr"), Some(0.8));
//! ```

pub mod cli;
pub mod error;
pub mod field;
pub mod instance;
pub mod io;
pub mod schema;
pub mod search;
pub mod validate;
pub mod value;

pub use error::{DeclarationError, Error, FieldError, FieldErrorKind, Result, ValidationError};
pub use field::{FieldCheck, FieldDescriptor, Hyperparam, HyperparamInfo};
pub use instance::{Diff, Hyperparams};
pub use schema::{Schema, SchemaBuilder};
pub use search::{ParamSpace, SearchSpace, SearchSpaceExport, SpaceEntry};
pub use value::{FieldKind, FieldType, HpType, HpValue};
