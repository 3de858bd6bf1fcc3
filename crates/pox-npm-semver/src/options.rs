//! Parsing and matching options

use serde::{Deserialize, Serialize};

/// Option bag consumed by every parse, compare and range operation.
///
/// All flags default to `false`. The serde representation uses the
/// camelCase names callers already know (`loose`, `includePrerelease`,
/// `rtl`), and missing fields fall back to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Relax the grammar: leading `v`/`=`/whitespace, leading zeros,
    /// optional `-` before the prerelease.
    pub loose: bool,
    /// Let range comparators match prerelease candidates even when the
    /// comparator's own version has none.
    pub include_prerelease: bool,
    /// Coercion scans right-to-left instead of left-to-right.
    pub rtl: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with only `loose` set.
    pub fn loose() -> Self {
        Options {
            loose: true,
            ..Self::default()
        }
    }

    /// Options with only `include_prerelease` set.
    pub fn include_prerelease() -> Self {
        Options {
            include_prerelease: true,
            ..Self::default()
        }
    }

    pub fn with_loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    pub fn with_include_prerelease(mut self, include_prerelease: bool) -> Self {
        self.include_prerelease = include_prerelease;
        self
    }

    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_strict() {
        let options = Options::default();
        assert!(!options.loose);
        assert!(!options.include_prerelease);
        assert!(!options.rtl);
    }

    #[test]
    fn test_builders() {
        assert!(Options::loose().loose);
        assert!(Options::include_prerelease().include_prerelease);
        let options = Options::new().with_rtl(true).with_loose(true);
        assert!(options.rtl);
        assert!(options.loose);
        assert!(!options.include_prerelease);
    }
}
