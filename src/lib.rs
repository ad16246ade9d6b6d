//! A Rust library for loading insurance-scheme member rosters with schema
//! validation, record normalization and membership statistics.
//!
//! Data flows one way: a raw tabular file is read into stringified rows,
//! the loader normalizes each row into a typed record (date coercion, age
//! derivation, relationship classification), the store publishes the table
//! wholesale, and the aggregator computes statistics from snapshots without
//! ever mutating them.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod reader;
pub mod schema;
pub mod stats;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{DateFormatConfig, LoaderConfig};
pub use error::{Result, RosterError};
pub use schema::SchemaVariant;

// Loading
pub use loader::{
    LeaverOutcome, LoadOutcome, LoadWarning, load_leaver_file, load_member_file,
    normalize_leavers, normalize_members,
};
pub use reader::{RawTable, read_table};

// Models
pub use models::{LeaverRecord, MemberRecord, MemberType, RelationshipRole, Sex};

// Session state
pub use store::{LeaverTable, MemberTable, RosterStore};

// Statistics
pub use stats::{AnalysisView, CrossTab, ViewReport, run_view};
