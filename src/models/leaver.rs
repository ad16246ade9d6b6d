//! Leaver record model
//!
//! A person recorded in a separate roster as having exited the scheme.
//! Shares the date, age and sex normalization rules of the member table but
//! carries an explicit relationship label from the source instead of a
//! derived role.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::types::Sex;

/// A normalized leaver row
#[derive(Debug, Clone, Serialize)]
pub struct LeaverRecord {
    /// Full names as provided
    pub names: String,
    /// Birth date; `None` when the source value did not parse
    pub birth_date: Option<NaiveDate>,
    /// Sex, normalized
    pub sex: Sex,
    /// Relationship label taken from the source (e.g. "Employee",
    /// "Dependent"), trimmed but otherwise untouched
    pub relationship: String,
    /// Scheme category, sentinel-filled when blank
    pub category: String,
    /// Age in whole years at the load's reference date
    pub age: Option<i64>,
}
