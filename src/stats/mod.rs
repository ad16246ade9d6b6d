//! Aggregate statistics over normalized roster tables.
//!
//! Every function here is a pure function of the table it is handed: nothing
//! mutates records, nothing carries state between calls, so re-running any
//! aggregate on an unchanged table yields identical output. Degenerate
//! inputs (empty groups, zero denominators) always produce a defined value
//! so every statistic stays renderable.

pub mod views;

pub use views::{AnalysisView, ViewReport, run_view};

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::models::{LeaverRecord, MemberRecord, MemberType, RelationshipRole};

/// Inclusive age band flagging dependents nearing age-out eligibility
pub const AGE_OUT_BOUNDS: (i64, i64) = (21, 26);

/// Relationship labels counted in leaver statistics; other labels are
/// dropped before any aggregation
pub const LEAVER_LABELS: &[&str] = &["Employee", "Dependent"];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator` rounded to 2 decimals, defined as 0 (not
/// infinity or NaN) when the denominator is 0
fn ratio_or_zero(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round2(numerator as f64 / denominator as f64)
    }
}

/// Row access shared by member and leaver records
pub trait AgedRecord {
    /// Age at the load's reference date, null when the birth date was
    /// unparsable
    fn age(&self) -> Option<i64>;
}

impl AgedRecord for MemberRecord {
    fn age(&self) -> Option<i64> {
        self.age
    }
}

impl AgedRecord for LeaverRecord {
    fn age(&self) -> Option<i64> {
        self.age
    }
}

/// Count rows per value of one categorical key, sorted by value
pub fn count_by<T>(records: &[T], key: impl Fn(&T) -> String) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts.into_iter().sorted().collect()
}

/// Counts per staff/dependent type
#[must_use]
pub fn type_counts(records: &[MemberRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| r.member_type.to_string())
}

/// Counts per relationship role
#[must_use]
pub fn relationship_counts(records: &[MemberRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| r.relationship.to_string())
}

/// Counts per sex
#[must_use]
pub fn sex_distribution(records: &[MemberRecord]) -> Vec<(String, usize)> {
    count_by(records, |r| r.sex.to_string())
}

/// Ratio of dependents to primary members, 0 when there are no primaries
#[must_use]
pub fn dependent_ratio(records: &[MemberRecord]) -> f64 {
    let staff = records
        .iter()
        .filter(|r| r.member_type == MemberType::Staff)
        .count();
    let dependents = records.len() - staff;
    ratio_or_zero(dependents, staff)
}

/// A dense cross-tabulation grid with zero-filled cells for unobserved
/// combinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    /// Sorted distinct values of the row key
    pub row_labels: Vec<String>,
    /// Sorted distinct values of the column key
    pub col_labels: Vec<String>,
    /// `counts[i][j]` is the number of rows with row label `i` and column
    /// label `j`
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Cell lookup by label pair; `None` when either label is absent
    #[must_use]
    pub fn get(&self, row: &str, col: &str) -> Option<usize> {
        let i = self.row_labels.iter().position(|l| l == row)?;
        let j = self.col_labels.iter().position(|l| l == col)?;
        Some(self.counts[i][j])
    }
}

/// Count rows grouped jointly by two categorical keys.
///
/// The grid is dense over the observed label sets: a combination that never
/// occurs still gets an explicit zero cell.
pub fn cross_tab<T>(
    records: &[T],
    row_key: impl Fn(&T) -> String,
    col_key: impl Fn(&T) -> String,
) -> CrossTab {
    let row_labels: Vec<String> = records.iter().map(&row_key).sorted().dedup().collect();
    let col_labels: Vec<String> = records.iter().map(&col_key).sorted().dedup().collect();

    // Label sets come from the records themselves, so every lookup hits
    let row_index: FxHashMap<&str, usize> = row_labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect();
    let col_index: FxHashMap<&str, usize> = col_labels
        .iter()
        .enumerate()
        .map(|(j, l)| (l.as_str(), j))
        .collect();

    let mut counts = vec![vec![0usize; col_labels.len()]; row_labels.len()];
    for record in records {
        if let (Some(&i), Some(&j)) = (
            row_index.get(row_key(record).as_str()),
            col_index.get(col_key(record).as_str()),
        ) {
            counts[i][j] += 1;
        }
    }

    CrossTab {
        row_labels,
        col_labels,
        counts,
    }
}

/// Mean of non-null ages per group, 2-decimal rounded, sorted by group.
///
/// Rows with null ages still define their group but are excluded from the
/// mean; a group with no aged rows reports 0 rather than an undefined value.
pub fn mean_age_by<T: AgedRecord>(
    records: &[T],
    key: impl Fn(&T) -> String,
) -> Vec<(String, f64)> {
    let mut sums: FxHashMap<String, (i64, usize)> = FxHashMap::default();
    for record in records {
        let entry = sums.entry(key(record)).or_insert((0, 0));
        if let Some(age) = record.age() {
            entry.0 += age;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(label, (sum, count))| {
            let mean = if count == 0 {
                0.0
            } else {
                round2(sum as f64 / count as f64)
            };
            (label, mean)
        })
        .sorted_by(|a, b| a.0.cmp(&b.0))
        .collect()
}

/// Dependents whose age lies inside the inclusive age-out band
#[must_use]
pub fn age_out_candidates(records: &[MemberRecord]) -> Vec<&MemberRecord> {
    let (low, high) = AGE_OUT_BOUNDS;
    records
        .iter()
        .filter(|r| {
            r.member_type == MemberType::Dependent && r.age.is_some_and(|a| (low..=high).contains(&a))
        })
        .collect()
}

/// Min/max/mean age over the non-null ages of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSummary {
    /// Lowest observed age, 0 when no row qualifies
    pub min: i64,
    /// Highest observed age, 0 when no row qualifies
    pub max: i64,
    /// Mean age rounded to 2 decimals, 0 when no row qualifies
    pub mean: f64,
    /// Number of rows with a non-null age
    pub count: usize,
}

/// Summarize an iterator of ages
pub fn age_summary(ages: impl IntoIterator<Item = i64>) -> AgeSummary {
    let ages: Vec<i64> = ages.into_iter().collect();
    if ages.is_empty() {
        return AgeSummary {
            min: 0,
            max: 0,
            mean: 0.0,
            count: 0,
        };
    }
    let sum: i64 = ages.iter().sum();
    AgeSummary {
        min: *ages.iter().min().unwrap_or(&0),
        max: *ages.iter().max().unwrap_or(&0),
        mean: round2(sum as f64 / ages.len() as f64),
        count: ages.len(),
    }
}

/// Age summaries per staff/dependent type, backing the age-distribution view
#[must_use]
pub fn age_summary_by_type(records: &[MemberRecord]) -> Vec<(String, AgeSummary)> {
    [MemberType::Staff, MemberType::Dependent]
        .iter()
        .map(|member_type| {
            let ages = records
                .iter()
                .filter(|r| r.member_type == *member_type)
                .filter_map(|r| r.age);
            (member_type.to_string(), age_summary(ages))
        })
        .collect()
}

/// The staff-vs-dependents summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffDependentSummary {
    /// Total primary members
    pub staff: usize,
    /// Total dependents
    pub dependents: usize,
    /// Dependents per staff, 0 when there are no staff
    pub dependents_per_staff: f64,
}

/// Compute the binary split counts and their ratio
#[must_use]
pub fn staff_dependent_summary(records: &[MemberRecord]) -> StaffDependentSummary {
    let staff = records
        .iter()
        .filter(|r| r.member_type == MemberType::Staff)
        .count();
    let dependents = records.len() - staff;
    StaffDependentSummary {
        staff,
        dependents,
        dependents_per_staff: ratio_or_zero(dependents, staff),
    }
}

/// The family-analysis summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilySummary {
    /// Rows whose relationship role is not a primary member
    pub total_family_members: usize,
    /// Family members per primary member, 0 when there are no primaries
    pub average_dependents_per_principal: f64,
}

/// Family breakdown over relationship roles
#[must_use]
pub fn family_summary(records: &[MemberRecord]) -> FamilySummary {
    let principals = records
        .iter()
        .filter(|r| {
            matches!(
                r.relationship,
                RelationshipRole::Staff | RelationshipRole::Member
            )
        })
        .count();
    let family_members = records.len() - principals;
    FamilySummary {
        total_family_members: family_members,
        average_dependents_per_principal: ratio_or_zero(family_members, principals),
    }
}

fn whitelisted(leavers: &[LeaverRecord]) -> Vec<&LeaverRecord> {
    leavers
        .iter()
        .filter(|l| LEAVER_LABELS.contains(&l.relationship.as_str()))
        .collect()
}

/// Leaver counts per relationship label, restricted to the label whitelist
#[must_use]
pub fn leaver_label_counts(leavers: &[LeaverRecord]) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for leaver in whitelisted(leavers) {
        *counts.entry(leaver.relationship.clone()).or_insert(0) += 1;
    }
    counts.into_iter().sorted().collect()
}

/// Mean leaver age per relationship label, restricted to the whitelist
#[must_use]
pub fn leaver_mean_age_by_label(leavers: &[LeaverRecord]) -> Vec<(String, f64)> {
    let filtered: Vec<LeaverRecord> = whitelisted(leavers).into_iter().cloned().collect();
    mean_age_by(&filtered, |l| l.relationship.clone())
}

/// Leaver relationship × category cross-tabulation over the whitelist
#[must_use]
pub fn leaver_cross_tab(leavers: &[LeaverRecord]) -> CrossTab {
    let filtered: Vec<LeaverRecord> = whitelisted(leavers).into_iter().cloned().collect();
    cross_tab(&filtered, |l| l.relationship.clone(), |l| l.category.clone())
}
