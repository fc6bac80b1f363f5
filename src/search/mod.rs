//! Search-space export
//!
//! Describes the tunable part of a configuration for an external
//! hyperparameter-search engine. The engine itself is out of scope; it only
//! receives the declarative [`ParamSpace`] (and can read it as JSON).
//!
//! # Example
//!
//! ```ignore
//! use hyperparams::{Hyperparam, Schema, SearchSpace, SearchSpaceExport};
//!
//! let schema = Schema::builder("Training")
//!     .field::<f64>(
//!         "lr",
//!         Hyperparam::new("Learning Rate")
//!             .default(0.1)
//!             .search_space(SearchSpace::LogUniform { low: 1e-2, high: 1e4 }),
//!     )
//!     .build()?;
//! let params = Hyperparams::with_defaults(&schema)?;
//! let space = params.param_space(false);
//! ```

mod export;
mod space;


pub use export::SearchSpaceExport;
pub use space::{ParamSpace, SearchSpace, SpaceEntry};
