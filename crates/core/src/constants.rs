//! Constants used throughout the identity core crate.
//!
//! Identifier shapes, registry literals and formatter fallbacks live here so the classifier,
//! translators and formatters agree on them.

/// National ids start with this digit.
pub const CITIZEN_PREFIX: &str = "1";

/// Iqama (residency) numbers start with this digit.
pub const EXPAT_PREFIX: &str = "2";

/// Length of a national id.
pub const NATIONAL_ID_LEN: usize = 10;

/// `id_type` written for citizens.
pub const ID_TYPE_NATIONAL_ID: &str = "NationalId";

/// `id_type` written for expatriates.
pub const ID_TYPE_IQAMA: &str = "Iqama";

/// Hours in a 365-day year. Age is elapsed hours divided by this, truncated.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Canonical date layout for birth dates exchanged with registries and consumers.
pub const DATE_LAYOUT: &str = "%d-%m-%Y";

/// Layout of dates typed by callers.
pub const ISO_DATE_LAYOUT: &str = "%Y-%m-%d";

/// Layout of the civil registry's birth date timestamp.
pub const CIVIL_TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Feature switch that stops all identity registry calls on a cache miss.
pub const FEATURE_DISABLE_UPSTREAM: &str = "disable-upstream";

/// Fallback for any compatibility field with no specific default.
pub const DEFAULT_GENERAL_VALUE: &str = "N/A";

/// Citizen nationality fallback.
pub const DEFAULT_SA_NATIONALITY: &str = "Saudi Arabia";

/// Citizen nationality code fallback.
pub const DEFAULT_SA_COUNTRY_CODE: &str = "SAU";

/// Marital status fallback.
pub const DEFAULT_UNKNOWN_MARITAL_STATUS: &str = "Unknown";

/// Marital status code fallback.
pub const DEFAULT_UNKNOWN_MARITAL_STATUS_CODE: &str = "U";
