//! Module for handling date parsing and age derivation.

use chrono::NaiveDate;

use crate::config::DateFormatConfig;

/// Parse a date string with multiple format attempts.
///
/// Blank input and anything that matches no format resolve to `None`; date
/// coercion is per-cell and never aborts a load.
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Try all the provided formats
    for format in &config.formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    // If enabled, try to detect the format based on string patterns
    if config.detect_format {
        if let Some(detected_format) = detect_day_first_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, &detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect a date format based on string patterns, preferring the
/// day-first convention wherever the string is ambiguous.
#[must_use]
pub fn detect_day_first_format(s: &str) -> Option<String> {
    // ISO-like format with dashes (YYYY-MM-DD)
    if s.len() == 10 && s.chars().nth(4) == Some('-') && s.chars().nth(7) == Some('-') {
        return Some("%Y-%m-%d".to_string());
    }

    // Slash-separated
    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 {
            if parts[0].len() == 4 {
                return Some("%Y/%m/%d".to_string());
            } else if parts[2].len() == 4 {
                // Day-first convention, even when the first part could be a month
                return Some("%d/%m/%Y".to_string());
            }
        }
    }

    // Dot-separated (DD.MM.YYYY)
    if s.contains('.') {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d.%m.%Y".to_string());
        }
    }

    // Compact format (YYYYMMDD)
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d".to_string());
    }

    None
}

/// Age in whole years as `floor(days / 365)`.
///
/// This deliberately ignores leap-year drift and calendar months; the
/// reporting layer depends on the exact floor(days/365) figure, so it must
/// not be replaced with a calendar-aware calculation.
#[must_use]
pub fn age_in_years(birth_date: NaiveDate, reference_date: NaiveDate) -> i64 {
    let days = (reference_date - birth_date).num_days();
    days.div_euclid(365)
}
