//! Content normalization for key=value resources
//!
//! Resolves which resources are `.properties` files by path pattern, and turns
//! their content into a canonical byte form that only changes when a
//! non-ignored key or value changes.

pub mod filter;
pub mod properties;
pub mod registry;

pub use filter::{FilterRule, PropertyFilter};
pub use properties::{canonicalize, Properties};
pub use registry::{PatternFilterRegistry, Resolution};
