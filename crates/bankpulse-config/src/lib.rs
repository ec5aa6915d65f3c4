//! # bankpulse config
//!
//! Configuration loading and validation for the bankpulse pipeline.
//!
//! Settings come from an optional YAML or TOML file, are overridden by
//! `BANKPULSE_*` environment variables, and fall back to defaults that
//! reproduce the standard `data/` and `reports/` layout.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
