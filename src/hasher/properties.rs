//! Properties-aware resource hasher
//!
//! Resources whose relative path matches a configured pattern are parsed as
//! `.properties` and hashed through their canonical form, minus the keys the
//! matching rules ignore. Everything else, and any `.properties` content that
//! fails to parse, goes to the delegate unchanged.

use crate::error::{ApiError, HashError};
use crate::hasher::raw::{compute_content_hash, RawContentHasher};
use crate::hasher::{put_str, ResourceHasher};
use crate::normalize::{canonicalize, FilterRule, PatternFilterRegistry};
use crate::resource::ResourceEntry;
use crate::types::Hash;
use tracing::{debug, trace};

/// Normalizing hasher wrapping a generic delegate.
#[derive(Debug, Clone)]
pub struct PropertiesAwareHasher<H = RawContentHasher> {
    registry: PatternFilterRegistry,
    delegate: H,
}

impl PropertiesAwareHasher<RawContentHasher> {
    /// Build from rules, delegating to [`RawContentHasher`].
    pub fn from_rules<I>(rules: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        Ok(Self::new(PatternFilterRegistry::new(rules)?, RawContentHasher))
    }
}

impl<H: ResourceHasher> PropertiesAwareHasher<H> {
    pub fn new(registry: PatternFilterRegistry, delegate: H) -> Self {
        Self { registry, delegate }
    }

    pub fn registry(&self) -> &PatternFilterRegistry {
        &self.registry
    }

    pub fn delegate(&self) -> &H {
        &self.delegate
    }
}

impl<H: ResourceHasher> ResourceHasher for PropertiesAwareHasher<H> {
    fn hash(&self, entry: &dyn ResourceEntry) -> Result<Option<Hash>, HashError> {
        if entry.is_directory() {
            return self.delegate.hash(entry);
        }

        let path = entry.relative_path();
        let resolution = self.registry.resolve(&path);
        if !resolution.matched() {
            return self.delegate.hash(entry);
        }

        let content = entry.content()?;
        match canonicalize(&content, resolution.ignored_keys()) {
            Ok(canonical) => {
                trace!(
                    path = %path,
                    ignored = resolution.ignored_keys().len(),
                    "Hashing canonical properties"
                );
                Ok(Some(compute_content_hash(&canonical)))
            }
            Err(err) => {
                debug!(
                    resource = %entry.display_name(),
                    error = %err,
                    "Could not normalize properties, hashing raw content"
                );
                self.delegate.hash(entry)
            }
        }
    }

    fn append_configuration(&self, hasher: &mut blake3::Hasher) {
        hasher.update(b"properties-aware");

        let mut rules: Vec<(&str, Vec<&str>)> = self
            .registry
            .rules()
            .iter()
            .map(|rule| (rule.pattern.as_str(), rule.filter.ignored_keys().collect()))
            .collect();
        rules.sort();
        rules.dedup();

        hasher.update(&(rules.len() as u64).to_be_bytes());
        for (pattern, ignored) in rules {
            put_str(hasher, pattern);
            hasher.update(&(ignored.len() as u64).to_be_bytes());
            for key in ignored {
                put_str(hasher, key);
            }
        }

        self.delegate.append_configuration(hasher);
    }
}
