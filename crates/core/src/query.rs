//! Identity queries and their classification.
//!
//! A query is an identifier plus the birth date the caller typed. Its kind is derived from the
//! identifier shape every time it is asked for; nothing is cached on the struct, so a query
//! whose `id` is edited reclassifies itself.

use crate::constants::{CITIZEN_PREFIX, EXPAT_PREFIX, NATIONAL_ID_LEN};
use serde::{Deserialize, Serialize};

/// The identity population an identifier belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    Unknown,
    Citizen,
    Expat,
}

/// Classifies an identifier by shape alone.
///
/// - 10 characters starting with `1`: citizen national id
/// - more than 4 characters starting with `2`: expatriate iqama number
/// - anything else: unknown
pub fn classify(id: &str) -> IdentityKind {
    if id.len() == NATIONAL_ID_LEN && id.starts_with(CITIZEN_PREFIX) {
        return IdentityKind::Citizen;
    }
    if id.len() > 4 && id.starts_with(EXPAT_PREFIX) {
        return IdentityKind::Expat;
    }
    IdentityKind::Unknown
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityQuery {
    pub id: String,
    pub birth_date: String,
}

impl IdentityQuery {
    pub fn new(id: impl Into<String>, birth_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Builds a query from raw request parameters.
    ///
    /// Reads `id` and `birth_date`; the first occurrence of each wins and a missing parameter
    /// becomes an empty string.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut id = None;
        let mut birth_date = None;
        for (key, value) in pairs {
            match key.as_ref() {
                "id" if id.is_none() => id = Some(value.into()),
                "birth_date" if birth_date.is_none() => birth_date = Some(value.into()),
                _ => {}
            }
        }
        Self {
            id: id.unwrap_or_default(),
            birth_date: birth_date.unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> IdentityKind {
        classify(&self.id)
    }
}
