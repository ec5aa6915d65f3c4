//! # bankpulse cleaner
//!
//! Turns a raw review scrape into a cleaned file in five stages:
//! duplicate removal, missing-value removal, date parsing, text
//! normalization, and a minimum text length.
//!
//! Only a missing input file is an error. Everything else drops rows and
//! shows up in the [`CleaningReport`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cleaner;
pub mod dates;
pub mod io;

pub use cleaner::{clean_rows, parse_rating, CleaningReport, MIN_REVIEW_CHARS};
pub use dates::parse_review_date;
pub use io::{
    preprocess_reviews, read_clean_reviews, read_raw_reviews, write_clean_reviews,
    CleaningOutcome, RawTable, REQUIRED_COLUMNS,
};
