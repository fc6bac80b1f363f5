//! Command-line synthesis
//!
//! Turns a schema into clap arguments and parsed matches back into a
//! validated instance.
//!
//! # Usage
//!
//! ```bash
//! train --lr 0.01 --epochs 5 --mode sazil --do-train --no-delete-model
//! ```
//!
//! Every non-boolean field `foo_bar` becomes `--foo-bar <FOO_BAR>`. Every
//! boolean field becomes a mutually exclusive `--foo-bar` / `--no-foo-bar`
//! pair; the pair is required when the field has no default. A nullable
//! field also accepts a bare `--foo-bar`, which sets it to null.

mod args;
mod parser;


pub use args::{add_arguments, command, from_arguments, parse_from};
pub use parser::FieldValueParser;
