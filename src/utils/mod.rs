//! Utility functions shared across the loader.

pub mod date;

pub use date::{age_in_years, detect_day_first_format, parse_date_string};
