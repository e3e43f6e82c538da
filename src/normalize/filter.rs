//! Key filters for `.properties` normalization

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Decides which property keys are left out of the canonical form.
///
/// Keys are compared exactly: no case folding, no trimming, no Unicode
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertyFilter {
    /// Keep every key
    #[default]
    IgnoreNothing,
    /// Drop keys that are members of the set
    IgnoreKeys(BTreeSet<String>),
}

impl PropertyFilter {
    /// Build a filter from a list of keys. An empty list ignores nothing.
    pub fn ignoring<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            PropertyFilter::IgnoreNothing
        } else {
            PropertyFilter::IgnoreKeys(keys)
        }
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        match self {
            PropertyFilter::IgnoreNothing => false,
            PropertyFilter::IgnoreKeys(keys) => keys.contains(key),
        }
    }

    /// Ignored keys in ascending order (empty for `IgnoreNothing`)
    pub fn ignored_keys(&self) -> impl Iterator<Item = &str> {
        let keys = match self {
            PropertyFilter::IgnoreNothing => None,
            PropertyFilter::IgnoreKeys(keys) => Some(keys),
        };
        keys.into_iter().flatten().map(String::as_str)
    }
}

/// A glob pattern paired with the filter applied to matching resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FilterRuleConfig", into = "FilterRuleConfig")]
pub struct FilterRule {
    pub pattern: String,
    pub filter: PropertyFilter,
}

impl FilterRule {
    pub fn new(pattern: impl Into<String>, filter: PropertyFilter) -> Self {
        Self {
            pattern: pattern.into(),
            filter,
        }
    }
}

/// On-disk shape of a rule: `pattern = "..."`, optional `ignore = [...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FilterRuleConfig {
    pattern: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ignore: Vec<String>,
}

impl From<FilterRuleConfig> for FilterRule {
    fn from(raw: FilterRuleConfig) -> Self {
        FilterRule::new(raw.pattern, PropertyFilter::ignoring(raw.ignore))
    }
}

impl From<FilterRule> for FilterRuleConfig {
    fn from(rule: FilterRule) -> Self {
        let ignore = rule.filter.ignored_keys().map(str::to_string).collect();
        FilterRuleConfig {
            pattern: rule.pattern,
            ignore,
        }
    }
}
