//! Analysis views consumed by the presentation layer.
//!
//! The dashboard selects one view name from a fixed set; each view resolves
//! to one bundle of statistics computed from the current normalized table.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RosterError;
use crate::models::MemberRecord;
use crate::stats::{
    AgeSummary, CrossTab, FamilySummary, StaffDependentSummary, age_summary_by_type, cross_tab,
    family_summary, relationship_counts, sex_distribution, staff_dependent_summary, type_counts,
};

/// The fixed set of analysis view names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisView {
    /// Binary split counts and ratio
    StaffVsDependents,
    /// Per-type age summaries
    AgeDistribution,
    /// Relationship breakdown and family ratios
    FamilyAnalysis,
    /// Counts per sex plus the sex × relationship grid
    SexDistribution,
}

impl AnalysisView {
    /// All supported views, in presentation order
    pub const ALL: [Self; 4] = [
        Self::StaffVsDependents,
        Self::AgeDistribution,
        Self::FamilyAnalysis,
        Self::SexDistribution,
    ];

    /// Stable view name used for selection
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StaffVsDependents => "staff-vs-dependents",
            Self::AgeDistribution => "age-distribution",
            Self::FamilyAnalysis => "family-analysis",
            Self::SexDistribution => "sex-distribution",
        }
    }
}

impl fmt::Display for AnalysisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AnalysisView {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|view| view.name() == s)
            .ok_or_else(|| RosterError::UnknownView(s.to_string()))
    }
}

/// The statistics bundle one view resolves to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewReport {
    /// Binary split counts, relationship breakdown and the dependents ratio
    StaffVsDependents {
        /// Summary statistics table
        summary: StaffDependentSummary,
        /// Counts per staff/dependent type
        type_counts: Vec<(String, usize)>,
        /// Counts per relationship role
        relationship_counts: Vec<(String, usize)>,
    },
    /// Per-type age summaries
    AgeDistribution {
        /// Age summary per staff/dependent type
        by_type: Vec<(String, AgeSummary)>,
    },
    /// Relationship breakdown plus family ratios
    FamilyAnalysis {
        /// Family summary table
        summary: FamilySummary,
        /// Counts per relationship role
        relationship_counts: Vec<(String, usize)>,
        /// Category × relationship grid
        category_by_relationship: CrossTab,
    },
    /// Counts per sex plus the sex × relationship grid
    SexDistribution {
        /// Counts per sex
        counts: Vec<(String, usize)>,
        /// Sex × relationship grid
        sex_by_relationship: CrossTab,
    },
}

/// Compute the statistics bundle for one view.
///
/// Pure and idempotent: two calls with the same view over an unchanged table
/// produce identical reports.
#[must_use]
pub fn run_view(view: AnalysisView, records: &[MemberRecord]) -> ViewReport {
    match view {
        AnalysisView::StaffVsDependents => ViewReport::StaffVsDependents {
            summary: staff_dependent_summary(records),
            type_counts: type_counts(records),
            relationship_counts: relationship_counts(records),
        },
        AnalysisView::AgeDistribution => ViewReport::AgeDistribution {
            by_type: age_summary_by_type(records),
        },
        AnalysisView::FamilyAnalysis => ViewReport::FamilyAnalysis {
            summary: family_summary(records),
            relationship_counts: relationship_counts(records),
            category_by_relationship: cross_tab(
                records,
                |r| r.category.clone(),
                |r| r.relationship.to_string(),
            ),
        },
        AnalysisView::SexDistribution => ViewReport::SexDistribution {
            counts: sex_distribution(records),
            sex_by_relationship: cross_tab(
                records,
                |r| r.sex.to_string(),
                |r| r.relationship.to_string(),
            ),
        },
    }
}
