//! Session-held normalized tables.
//!
//! The host holds one [`RosterStore`] per session and passes it by reference
//! to each operation. A load publishes a fully constructed table in a single
//! swap; readers take [`Arc`] snapshots, so an in-flight aggregation always
//! observes a complete table and a failed load leaves the previous one
//! intact.

use std::sync::Arc;

use crate::loader::{LeaverOutcome, LoadOutcome, LoadWarning};
use crate::models::{LeaverRecord, MemberRecord};

/// The normalized member table published by one successful load
#[derive(Debug)]
pub struct MemberTable {
    /// Normalized records
    pub records: Vec<MemberRecord>,
    /// Warnings surfaced by the load that produced this table
    pub warnings: Vec<LoadWarning>,
}

/// The normalized leaver table published by one successful load
#[derive(Debug)]
pub struct LeaverTable {
    /// Normalized records
    pub records: Vec<LeaverRecord>,
    /// Warnings surfaced by the load that produced this table
    pub warnings: Vec<LoadWarning>,
}

/// Owned session state: the current member and leaver tables, if any
#[derive(Debug, Default)]
pub struct RosterStore {
    members: Option<Arc<MemberTable>>,
    leavers: Option<Arc<LeaverTable>>,
}

impl RosterStore {
    /// An empty store with no tables loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the member table wholesale with the outcome of a successful
    /// load and return a snapshot of the new table.
    pub fn publish_members(&mut self, outcome: LoadOutcome) -> Arc<MemberTable> {
        let table = Arc::new(MemberTable {
            records: outcome.records,
            warnings: outcome.warnings,
        });
        self.members = Some(Arc::clone(&table));
        table
    }

    /// Replace the leaver table wholesale and return a snapshot.
    pub fn publish_leavers(&mut self, outcome: LeaverOutcome) -> Arc<LeaverTable> {
        let table = Arc::new(LeaverTable {
            records: outcome.records,
            warnings: outcome.warnings,
        });
        self.leavers = Some(Arc::clone(&table));
        table
    }

    /// Snapshot of the current member table, if one has been loaded
    #[must_use]
    pub fn members(&self) -> Option<Arc<MemberTable>> {
        self.members.as_ref().map(Arc::clone)
    }

    /// Snapshot of the current leaver table, if one has been loaded
    #[must_use]
    pub fn leavers(&self) -> Option<Arc<LeaverTable>> {
        self.leavers.as_ref().map(Arc::clone)
    }
}
