//! Prophash: normalized-content hashing for classpath resources
//!
//! Decides whether a classpath resource (a file inside an archive, or a file
//! on disk) has meaningfully changed. Resources matching configured patterns
//! are parsed as `.properties`; comments, ordering and ignored keys are
//! stripped before hashing. Everything else is hashed byte for byte.
//!
//! ```no_run
//! use prophash::hasher::{PropertiesAwareHasher, ResourceHasher};
//! use prophash::normalize::{FilterRule, PropertyFilter};
//! use prophash::resource::ArchiveEntry;
//!
//! let hasher = PropertiesAwareHasher::from_rules(vec![
//!     FilterRule::new("**/*.properties", PropertyFilter::IgnoreNothing),
//!     FilterRule::new("META-INF/build-info.properties", PropertyFilter::ignoring(["build.time"])),
//! ])?;
//! let entry = ArchiveEntry::new("app.jar", "META-INF/build-info.properties", b"build.time=now".to_vec());
//! let hash = hasher.hash(&entry)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod normalize;
pub mod resource;
pub mod types;
