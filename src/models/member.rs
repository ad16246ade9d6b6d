//! Member record model
//!
//! One row of the normalized table. Every derived field (age, type,
//! relationship role) is computed once at load time from the raw row and the
//! load's reference date; records are never mutated field-by-field afterwards.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::types::{MemberType, RelationshipRole, Sex};

/// Sentinel for a missing scheme category
pub const CATEGORY_NOT_SPECIFIED: &str = "Not Specified";

/// A normalized scheme member or dependent
#[derive(Debug, Clone, Serialize)]
pub struct MemberRecord {
    /// Member number, unique within a load (not globally enforced)
    pub member_number: String,
    /// Surname as provided
    pub surname: String,
    /// Other names as provided
    pub other_names: String,
    /// Scheme category, or [`CATEGORY_NOT_SPECIFIED`] when blank in source
    pub category: String,
    /// Raw principal-membership indicator ("Y" or blank/other)
    pub principal_flag: String,
    /// Birth date; `None` when the source value did not parse
    pub birth_date: Option<NaiveDate>,
    /// Sex, normalized
    pub sex: Sex,
    /// Scheme entry date; `None` when the source value did not parse
    pub entry_date: Option<NaiveDate>,
    /// Status passthrough
    pub status: String,
    /// Age in whole years at the load's reference date; `None` when the
    /// birth date is null
    pub age: Option<i64>,
    /// Coarse staff/dependent classification
    pub member_type: MemberType,
    /// Relationship role (derived or declared depending on source layout)
    pub relationship: RelationshipRole,
}

/// Normalize a raw category cell: blank becomes the sentinel, everything
/// else passes through unchanged (no case-folding).
#[must_use]
pub fn normalize_category(raw: &str) -> String {
    if raw.trim().is_empty() {
        CATEGORY_NOT_SPECIFIED.to_string()
    } else {
        raw.to_string()
    }
}
