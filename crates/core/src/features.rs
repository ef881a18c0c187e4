//! Named feature switches.
//!
//! The switch list is fixed at startup. It is sorted once on construction so that lookups are a
//! binary search and never mutate shared state.

/// Immutable set of enabled feature names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureSwitches {
    enabled: Vec<String>,
}

impl FeatureSwitches {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut enabled: Vec<String> = names.into_iter().map(Into::into).collect();
        enabled.sort();
        enabled.dedup();
        Self { enabled }
    }

    /// True when `name` is exactly one of the enabled switches.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .is_ok()
    }

    pub fn names(&self) -> &[String] {
        &self.enabled
    }
}
