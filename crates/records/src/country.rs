//! ISO country lookup rows.

use serde::{Deserialize, Serialize};

/// Maps a free-text nationality to its ISO 3166 alpha-3 code and canonical English name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsoCountryCode {
    /// Free-text nationality value as registries spell it; the lookup key.
    pub nationality: String,
    pub code: Option<String>,
    pub country_name_en: Option<String>,
}
