//! Semantic versioning library compatible with npm's node-semver
//!
//! This crate provides version parsing, precedence comparison, increments,
//! coercion and range matching with the same grammar and results as the
//! `semver` package used by npm.

mod coerce;
mod error;
mod increment;
mod options;
pub mod range;
mod semver;
mod version;
mod version_parser;

pub use coerce::coerce;
pub use error::{Result, SemverError};
pub use increment::{PrereleaseBase, ReleaseType};
pub use options::Options;
pub use range::{Comparator, ComparatorSet, Hilo, Operator, Range};
pub use semver::Semver;
pub use version::{Identifier, Version};
pub use version_parser::{VersionParser, MAX_LENGTH, MAX_SAFE_COMPONENT_LENGTH, MAX_SAFE_INTEGER};
