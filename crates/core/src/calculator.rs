//! Derived fields and date reshaping.
//!
//! Age uses a fixed 365-day year: elapsed hours divided by 8760, truncated toward zero.
//! It is not calendar-aware and consumers rely on its exact output, so it must stay that way.

use crate::constants::{CIVIL_TIMESTAMP_LAYOUT, DATE_LAYOUT, HOURS_PER_YEAR, ISO_DATE_LAYOUT};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Dash offsets in a `DD-MM-YYYY` date.
const DATE_DASHES: [usize; 2] = [2, 5];
/// Dash offsets in a `YYYY-MM-DD` date.
const ISO_DATE_DASHES: [usize; 2] = [4, 7];
const DATE_WIDTH: usize = 10;

#[derive(Debug, Error)]
enum DateError {
    #[error("expected exactly 10 characters with dashes at {0:?}")]
    Shape([usize; 2]),
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Parses a fixed-width date. chrono alone accepts one-digit days and months and longer
/// years; registries and consumers only ever exchange zero-padded dates.
fn parse_exact(raw: &str, layout: &str, dashes: [usize; 2]) -> Result<NaiveDate, DateError> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == DATE_WIDTH
        && bytes.iter().enumerate().all(|(i, b)| {
            if dashes.contains(&i) {
                *b == b'-'
            } else {
                b.is_ascii_digit()
            }
        });
    if !shaped {
        return Err(DateError::Shape(dashes));
    }
    Ok(NaiveDate::parse_from_str(raw, layout)?)
}

/// Age in whole years for a `DD-MM-YYYY` birth date, measured now.
pub fn age(birth_date: Option<&str>) -> Option<String> {
    age_at(birth_date, Utc::now())
}

/// Age in whole years for a `DD-MM-YYYY` birth date, measured at `now`.
///
/// `None` and the empty string pass through as `None`. An unparsable date is logged and
/// yields `None`.
pub fn age_at(birth_date: Option<&str>, now: DateTime<Utc>) -> Option<String> {
    let raw = birth_date?;
    if raw.is_empty() {
        return None;
    }

    let born = match parse_exact(raw, DATE_LAYOUT, DATE_DASHES) {
        Ok(date) => date.and_hms_opt(0, 0, 0)?.and_utc(),
        Err(e) => {
            tracing::warn!(birth_date = raw, error = %e, "unparsable birth date, age not computed");
            return None;
        }
    };

    let hours = (now - born).num_milliseconds() as f64 / 3_600_000.0;
    let years = (hours / HOURS_PER_YEAR) as i64;
    Some(years.to_string())
}

/// Reshapes a `YYYY-MM-DD` date into the `DD-MM-YYYY` form registries expect.
///
/// Anything else is passed through, except that a value with at least two `/` has its first
/// two replaced by `-`. The parse failure itself is not reported.
pub fn format_birth_date(birth_date: &str) -> String {
    match parse_exact(birth_date, ISO_DATE_LAYOUT, ISO_DATE_DASHES) {
        Ok(date) => date.format(DATE_LAYOUT).to_string(),
        Err(e) => {
            tracing::debug!(birth_date, error = %e, "birth date not in YYYY-MM-DD, passing through");
            if birth_date.matches('/').count() >= 2 {
                return birth_date.replacen('/', "-", 2);
            }
            birth_date.to_string()
        }
    }
}

/// Converts the civil registry's `YYYY-MM-DDThh:mm:ss` timestamp to `DD-MM-YYYY`.
///
/// # Errors
///
/// Returns the parse error when the timestamp does not match the layout exactly.
pub fn civil_birth_date(timestamp: &str) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, CIVIL_TIMESTAMP_LAYOUT)?;
    Ok(parsed.format(DATE_LAYOUT).to_string())
}
