//! Error type shared by every strict operation

use thiserror::Error;

/// Typed failure raised by the strict operations.
///
/// Tolerant queries (`valid`, `valid_range`, `coerce`, ...) never produce
/// this; they return `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemverError {
    #[error("Invalid Version: {0}")]
    InvalidVersion(String),
    #[error("version is longer than {max} characters (got {length})")]
    VersionTooLong { length: usize, max: usize },
    #[error("Invalid {component} version: {value}")]
    ComponentTooLarge { component: &'static str, value: String },
    #[error("Invalid comparator: {0}")]
    InvalidComparator(String),
    #[error("Invalid SemVer Range: {0}")]
    InvalidRange(String),
    #[error("invalid increment argument: {0}")]
    InvalidReleaseType(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("invalid increment argument: identifier is empty")]
    EmptyIdentifier,
    #[error("invalid increment argument: identifier already exists: {0}")]
    IdentifierExists(String),
    #[error("Must provide a hilo val of \"<\" or \">\", got \"{0}\"")]
    InvalidHilo(String),
    #[error("item {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<SemverError>,
    },
}

impl SemverError {
    /// Attach the position of the offending element of a list input.
    pub fn at_index(self, index: usize) -> Self {
        SemverError::AtIndex {
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SemverError>;
