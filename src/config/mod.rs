//! Configuration for the roster loader.

use chrono::NaiveDate;

/// Date format configuration for string-to-date coercion
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Formats to attempt, in order (chrono `strftime` syntax)
    pub formats: Vec<String>,
    /// Enable pattern-based format detection when no listed format matches
    pub detect_format: bool,
}

impl DateFormatConfig {
    /// Strict day-first text-month format used for birth dates
    #[must_use]
    pub fn birth_date() -> Self {
        Self {
            formats: vec!["%d-%b-%Y".to_string()],
            detect_format: false,
        }
    }

    /// Permissive day-first formats used for entry dates
    #[must_use]
    pub fn entry_date() -> Self {
        Self {
            formats: [
                "%d-%b-%Y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%d %b %Y",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            detect_format: true,
        }
    }
}

/// Configuration for a roster load
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Reference date for age derivation; `None` means the load timestamp
    pub reference_date: Option<NaiveDate>,
    /// Birth date coercion formats
    pub birth_date: DateFormatConfig,
    /// Entry date coercion formats
    pub entry_date: DateFormatConfig,
    /// Log every individual coercion failure (the aggregated per-column
    /// warning is always produced)
    pub log_coercions: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            reference_date: None,
            birth_date: DateFormatConfig::birth_date(),
            entry_date: DateFormatConfig::entry_date(),
            log_coercions: true,
        }
    }
}

impl LoaderConfig {
    /// Configuration with a fixed reference date, for deterministic age
    /// derivation
    #[must_use]
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date: Some(reference_date),
            ..Self::default()
        }
    }

    /// The date ages are derived against. Ages are frozen at this date for
    /// the lifetime of the loaded table, never recomputed on later reads.
    #[must_use]
    pub fn resolve_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
