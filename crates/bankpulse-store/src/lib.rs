//! # bankpulse store
//!
//! Two-table relational storage (`banks`, `reviews`) for annotated reviews.
//!
//! - [`Database`] owns the connection pool and every write.
//! - [`AnnotatedReviewRow`] is the analysis output and converts into
//!   insertable records.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod annotated;
pub mod database;
pub mod schema;

pub use annotated::{load_annotated_reviews, AnnotatedReviewRow, SENTIMENT_SCORE_RANGE};
pub use database::{Database, InsertReport, VerificationReport};
