//! Roster normalization engine.
//!
//! Turns a raw table into normalized records in five independent steps:
//! header discard and schema binding, date coercion, age derivation, role
//! classification, and category cleanup. Binding failures abort the load;
//! every later step is per-cell fault-tolerant and can only downgrade a
//! value to null plus an aggregated warning.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{DateFormatConfig, LoaderConfig};
use crate::error::{Result, RosterError};
use crate::models::member::normalize_category;
use crate::models::{LeaverRecord, MemberRecord, MemberType, RelationshipRole, Sex};
use crate::reader::read_table;
use crate::schema::SchemaVariant;
use crate::utils::date::{age_in_years, parse_date_string};

/// A non-fatal condition surfaced by a load, once per affected column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoadWarning {
    /// At least one row held a value in this column that did not parse as a
    /// date and was set to null
    UnparsableDates {
        /// The affected source column
        column: &'static str,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsableDates { column } => write!(
                f,
                "some {column} values could not be parsed; the affected rows carry a null date"
            ),
        }
    }
}

/// Result of one member load: the normalized table plus its warnings
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Normalized member records, one per non-empty raw data row
    pub records: Vec<MemberRecord>,
    /// Aggregated non-fatal conditions
    pub warnings: Vec<LoadWarning>,
}

/// Result of one leaver load
#[derive(Debug, Clone)]
pub struct LeaverOutcome {
    /// Normalized leaver records
    pub records: Vec<LeaverRecord>,
    /// Aggregated non-fatal conditions
    pub warnings: Vec<LoadWarning>,
}

/// Tracks date coercion failures per column across a whole load, so the
/// outcome carries one warning per column rather than one per row.
struct DateCoercion<'a> {
    column: &'static str,
    config: &'a DateFormatConfig,
    log_coercions: bool,
    failed: bool,
}

impl<'a> DateCoercion<'a> {
    fn new(column: &'static str, config: &'a DateFormatConfig, log_coercions: bool) -> Self {
        Self {
            column,
            config,
            log_coercions,
            failed: false,
        }
    }

    fn parse(&mut self, raw: &str) -> Option<chrono::NaiveDate> {
        let parsed = parse_date_string(raw, self.config);
        if parsed.is_none() {
            self.failed = true;
            if self.log_coercions && !raw.trim().is_empty() {
                debug!("unparsable {} value: `{raw}`", self.column);
            }
        }
        parsed
    }

    fn finish(self, warnings: &mut Vec<LoadWarning>) {
        if self.failed {
            warn!("some {} values could not be parsed", self.column);
            warnings.push(LoadWarning::UnparsableDates {
                column: self.column,
            });
        }
    }
}

/// Load and normalize a member roster file.
pub fn load_member_file(
    path: &Path,
    variant: SchemaVariant,
    config: &LoaderConfig,
) -> Result<LoadOutcome> {
    let raw = read_table(path)?;
    normalize_members(&raw, variant, config)
}

/// Load and normalize a leavers file.
pub fn load_leaver_file(path: &Path, config: &LoaderConfig) -> Result<LeaverOutcome> {
    let raw = read_table(path)?;
    normalize_leavers(&raw, config)
}

/// Normalize a raw member table.
///
/// The first raw row is always treated as a header and discarded. Fully
/// empty rows are skipped. Any row whose width does not match the schema
/// fails the whole load; no partial table is returned.
pub fn normalize_members(
    raw: &[Vec<String>],
    variant: SchemaVariant,
    config: &LoaderConfig,
) -> Result<LoadOutcome> {
    if variant == SchemaVariant::Leavers {
        return Err(RosterError::Other(
            "the leavers schema is loaded with the leavers loader".to_string(),
        ));
    }

    let reference_date = config.resolve_reference_date();
    let mut birth_dates = DateCoercion::new("Birth Date", &config.birth_date, config.log_coercions);
    let mut entry_dates = DateCoercion::new("Entry Date", &config.entry_date, config.log_coercions);

    let mut records = Vec::new();
    for (row_idx, cells) in raw.iter().enumerate().skip(1) {
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let row = variant.bind(cells, row_idx)?;

        let birth_date = birth_dates.parse(row.get("Birth Date")?);
        let entry_date = entry_dates.parse(row.get("Entry Date")?);
        let age = birth_date.map(|d| age_in_years(d, reference_date));

        let principal_flag = row.get("P/Cont")?.trim().to_string();
        let sex = Sex::from(row.get("Sex")?);
        let relationship = match variant {
            SchemaVariant::StaffDependent => RelationshipRole::derive(&principal_flag, sex, age),
            // The raw relationship column is overridden by the binary split
            SchemaVariant::FullList => RelationshipRole::declared(&principal_flag),
            SchemaVariant::Leavers => unreachable!("rejected above"),
        };

        records.push(MemberRecord {
            member_number: row.get("Member Number")?.to_string(),
            surname: row.get("Surname")?.to_string(),
            other_names: row.get("Other Name(s)")?.to_string(),
            category: normalize_category(row.get("CAT")?),
            principal_flag,
            birth_date,
            sex,
            entry_date,
            status: row.get("Status")?.to_string(),
            age,
            member_type: MemberType::from_flag(row.get("P/Cont")?),
            relationship,
        });
    }

    let mut warnings = Vec::new();
    birth_dates.finish(&mut warnings);
    entry_dates.finish(&mut warnings);

    info!(
        "normalized {} member records ({} schema, reference date {reference_date})",
        records.len(),
        variant.name()
    );
    Ok(LoadOutcome { records, warnings })
}

/// Normalize a raw leavers table.
///
/// Same date, sex and age rules as the member table; the relationship label
/// is taken from the source rather than derived.
pub fn normalize_leavers(raw: &[Vec<String>], config: &LoaderConfig) -> Result<LeaverOutcome> {
    let reference_date = config.resolve_reference_date();
    let mut birth_dates =
        DateCoercion::new("Date of Birth", &config.birth_date, config.log_coercions);

    let mut records = Vec::new();
    for (row_idx, cells) in raw.iter().enumerate().skip(1) {
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let row = SchemaVariant::Leavers.bind(cells, row_idx)?;

        let birth_date = birth_dates.parse(row.get("Date of Birth")?);
        records.push(LeaverRecord {
            names: row.get("Names")?.to_string(),
            birth_date,
            sex: Sex::from(row.get("Sex")?),
            relationship: row.get("Relationship")?.trim().to_string(),
            category: normalize_category(row.get("CAT")?),
            age: birth_date.map(|d| age_in_years(d, reference_date)),
        });
    }

    let mut warnings = Vec::new();
    birth_dates.finish(&mut warnings);

    info!("normalized {} leaver records", records.len());
    Ok(LeaverOutcome { records, warnings })
}
