//! Pattern filter registry: maps relative resource paths to property filters.
//!
//! Patterns use Ant-style globs over `/`-separated relative paths: `**` spans
//! any number of directories (including none), `*` and `?` stay within one
//! path segment. Every rule whose pattern matches contributes its ignored keys;
//! the effective filter is the union, so declaration order never matters.

use crate::error::ApiError;
use crate::normalize::filter::{FilterRule, PropertyFilter};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;

/// Outcome of resolving a path against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    matched: bool,
    ignored_keys: BTreeSet<String>,
}

impl Resolution {
    /// True if at least one pattern matched, whatever its filter ignores.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Union of the ignored keys of every matching rule
    pub fn ignored_keys(&self) -> &BTreeSet<String> {
        &self.ignored_keys
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignored_keys.contains(key)
    }
}

/// Immutable set of filter rules compiled into a single glob set.
#[derive(Debug, Clone)]
pub struct PatternFilterRegistry {
    rules: Vec<FilterRule>,
    globs: GlobSet,
}

impl PatternFilterRegistry {
    /// Compile the rules. Fails if any pattern is not a valid glob.
    pub fn new<I>(rules: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let rules: Vec<FilterRule> = rules.into_iter().collect();
        let mut builder = GlobSetBuilder::new();
        for rule in &rules {
            let glob = GlobBuilder::new(&rule.pattern)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_err(|e| ApiError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    reason: e.kind().to_string(),
                })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| ApiError::InvalidPattern {
            pattern: e.glob().unwrap_or_default().to_string(),
            reason: e.kind().to_string(),
        })?;

        Ok(Self { rules, globs })
    }

    /// Registry with no rules; never matches.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            globs: GlobSet::empty(),
        }
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the effective filter for a `/`-joined relative path.
    pub fn resolve(&self, relative_path: &str) -> Resolution {
        let candidate = relative_path.trim_start_matches('/');
        let mut resolution = Resolution::default();
        for index in self.globs.matches(candidate) {
            resolution.matched = true;
            if let PropertyFilter::IgnoreKeys(keys) = &self.rules[index].filter {
                resolution.ignored_keys.extend(keys.iter().cloned());
            }
        }
        resolution
    }
}

impl Default for PatternFilterRegistry {
    fn default() -> Self {
        Self::empty()
    }
}
