//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Nothing here reads process-wide environment variables itself; the
//! binary reads them and hands the raw values to the `*_from_env_value` helpers.

use crate::compat::FormatterDefaults;
use crate::constants::DEFAULT_GENERAL_VALUE;
use crate::features::FeatureSwitches;
use crate::{IdentityError, IdentityResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    features: FeatureSwitches,
    defaults: FormatterDefaults,
}

impl CoreConfig {
    pub fn new(features: FeatureSwitches, defaults: FormatterDefaults) -> Self {
        Self { features, defaults }
    }

    pub fn features(&self) -> &FeatureSwitches {
        &self.features
    }

    pub fn defaults(&self) -> &FormatterDefaults {
        &self.defaults
    }
}

/// Parse a comma separated feature list.
///
/// `None`, blank values and empty list entries are ignored. Names may contain ASCII letters,
/// digits, `-` and `_`.
pub fn features_from_env_value(value: Option<String>) -> IdentityResult<FeatureSwitches> {
    let raw = value.unwrap_or_default();
    let mut names = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(IdentityError::InvalidConfig(format!(
                "invalid feature name {name:?}"
            )));
        }
        names.push(name.to_string());
    }
    Ok(FeatureSwitches::new(names))
}

/// Parse the general fallback used by the compatibility formatters.
///
/// If `value` is `None` or blank, returns the built-in fallback.
pub fn general_default_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_GENERAL_VALUE.to_string())
}
