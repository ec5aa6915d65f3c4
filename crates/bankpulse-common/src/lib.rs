//! # bankpulse common
//!
//! Shared types, errors, utilities, and logging setup for the bankpulse
//! review pipeline.
//!
//! Every other crate in the workspace builds on the row types and the
//! [`PulseError`] type defined here.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{PulseError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingGuard};
pub use types::*;
pub use utils::*;
