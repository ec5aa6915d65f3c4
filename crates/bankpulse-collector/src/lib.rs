//! # bankpulse collector
//!
//! Fetches paginated app-store reviews per bank, projects them onto the raw
//! review layout, and writes the combined scrape to CSV.
//!
//! A failing app never stops a run: its error goes to a side log file and it
//! contributes no rows.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod collector;
pub mod output;

pub use client::{PageRequest, ReviewPage, ReviewSource, StoreClient, StoreReview};
pub use collector::{project_review, select_reviews, CollectionSettings, Collector};
pub use output::{write_raw_reviews, CollectionSummary};
