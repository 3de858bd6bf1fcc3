//! Parsed semantic version value and its ordering

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::SemverError;
use crate::options::Options;
use crate::version_parser::{VersionParser, MAX_SAFE_INTEGER};

/// A single prerelease identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Purely numeric identifier below the safe-integer bound
    Numeric(u64),
    /// Anything else, kept verbatim
    AlphaNumeric(String),
}

impl Identifier {
    /// Classify a raw identifier the way the parser does.
    pub fn parse(raw: &str) -> Self {
        if is_numeric(raw) {
            if let Ok(value) = raw.parse::<u64>() {
                if value < MAX_SAFE_INTEGER {
                    return Identifier::Numeric(value);
                }
            }
        }
        Identifier::AlphaNumeric(raw.to_string())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            // digit-only strings only survive parsing when they are too large
            // to be numeric; they still order numerically
            (Identifier::Numeric(_), Identifier::AlphaNumeric(_)) => Ordering::Less,
            (Identifier::AlphaNumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => {
                if is_numeric(a) && is_numeric(b) {
                    compare_digit_strings(a, b)
                } else {
                    a.cmp(b)
                }
            }
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

fn is_numeric(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn compare_digit_strings(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// An immutable parsed version.
///
/// Equality, hashing and ordering follow semver precedence: build metadata
/// and the raw input text are ignored. Use [`Version::compare_build`] for a
/// build-aware tie break.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<String>,
    raw: String,
}

impl Version {
    /// Create a release version with no prerelease or build metadata.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self::from_parts(major, minor, patch, Vec::new(), Vec::new(), None)
    }

    /// Assemble a version from its components.
    ///
    /// When `raw` is `None` the raw text is the formatted version followed by
    /// any build metadata.
    pub(crate) fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Vec<Identifier>,
        build: Vec<String>,
        raw: Option<&str>,
    ) -> Self {
        let mut version = Version {
            major,
            minor,
            patch,
            prerelease,
            build,
            raw: String::new(),
        };
        version.raw = match raw {
            Some(raw) => raw.to_string(),
            None => version.formatted_with_build(),
        };
        version
    }

    /// Parse a version with the given options.
    pub fn parse(text: &str, options: &Options) -> Result<Self, SemverError> {
        VersionParser::parse(text, options)
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    pub fn build(&self) -> &[String] {
        &self.build
    }

    /// The text this version was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Whether both versions share major.minor.patch.
    pub fn same_triple(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }

    /// The same version without build metadata, raw text re-derived.
    pub fn without_build(&self) -> Version {
        Self::from_parts(
            self.major,
            self.minor,
            self.patch,
            self.prerelease.clone(),
            Vec::new(),
            None,
        )
    }

    /// Compare major, minor and patch numerically.
    pub fn compare_main(&self, other: &Version) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
    }

    /// Compare prerelease sequences. A version without prerelease is higher
    /// than one with; a strict prefix sorts lower.
    pub fn compare_pre(&self, other: &Version) -> Ordering {
        match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
            (true, true) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (false, false) => self.prerelease.cmp(&other.prerelease),
        }
    }

    /// Precedence first, then build identifiers as case-sensitive strings.
    pub fn compare_build(&self, other: &Version) -> Ordering {
        self.cmp(other).then_with(|| self.build.cmp(&other.build))
    }

    fn formatted_with_build(&self) -> String {
        if self.build.is_empty() {
            self.to_string()
        } else {
            format!("{}+{}", self, self.build.join("."))
        }
    }

    pub(crate) fn set_prerelease(&mut self, prerelease: Vec<Identifier>) {
        self.prerelease = prerelease;
    }

    pub(crate) fn prerelease_mut(&mut self) -> &mut Vec<Identifier> {
        &mut self.prerelease
    }

    pub(crate) fn set_main(&mut self, major: u64, minor: u64, patch: u64) {
        self.major = major;
        self.minor = minor;
        self.patch = patch;
    }

    pub(crate) fn refresh_raw(&mut self) {
        self.raw = self.formatted_with_build();
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_main(other).then_with(|| self.compare_pre(other))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Formats as `major.minor.patch[-prerelease]`; build metadata is omitted.
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some((first, rest)) = self.prerelease.split_first() {
            write!(f, "-{}", first)?;
            for id in rest {
                write!(f, ".{}", id)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionParser::parse(s, &Options::default())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Version", 7)?;
        record.serialize_field("version", &self.to_string())?;
        record.serialize_field("major", &self.major)?;
        record.serialize_field("minor", &self.minor)?;
        record.serialize_field("patch", &self.patch)?;
        record.serialize_field("prerelease", &self.prerelease)?;
        record.serialize_field("build", &self.build)?;
        record.serialize_field("raw", &self.raw)?;
        record.end()
    }
}
