//! Version grammar and parsing
//!
//! Every regular expression used by the engine lives in the table below,
//! assembled from shared fragments so the version, range and coercion
//! grammars stay in sync.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::SemverError;
use crate::options::Options;
use crate::version::{Identifier, Version};

/// Longest accepted version string.
pub const MAX_LENGTH: usize = 256;

/// Largest integer a version component may hold (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Longest digit run picked up by coercion.
pub const MAX_SAFE_COMPONENT_LENGTH: usize = 16;

const NUMERIC_IDENTIFIER: &str = r"0|[1-9][0-9]*";
const NUMERIC_IDENTIFIER_LOOSE: &str = r"[0-9]+";
const NON_NUMERIC_IDENTIFIER: &str = r"[0-9]*[a-zA-Z-][a-zA-Z0-9-]*";
const BUILD_IDENTIFIER: &str = r"[a-zA-Z0-9-]+";
const GTLT: &str = r"((?:<|>)?=?)";

lazy_static! {
    static ref MAIN_VERSION: String = format!(
        r"({n})\.({n})\.({n})",
        n = NUMERIC_IDENTIFIER
    );
    static ref MAIN_VERSION_LOOSE: String = format!(
        r"({n})\.({n})\.({n})",
        n = NUMERIC_IDENTIFIER_LOOSE
    );

    static ref PRERELEASE_IDENTIFIER: String = format!(
        "(?:{}|{})",
        NON_NUMERIC_IDENTIFIER, NUMERIC_IDENTIFIER
    );
    static ref PRERELEASE_IDENTIFIER_LOOSE: String = format!(
        "(?:{}|{})",
        NON_NUMERIC_IDENTIFIER, NUMERIC_IDENTIFIER_LOOSE
    );

    static ref PRERELEASE: String = format!(
        r"(?:-({id}(?:\.{id})*))",
        id = *PRERELEASE_IDENTIFIER
    );
    static ref PRERELEASE_LOOSE: String = format!(
        r"(?:-?({id}(?:\.{id})*))",
        id = *PRERELEASE_IDENTIFIER_LOOSE
    );

    static ref BUILD: String = format!(
        r"(?:\+({id}(?:\.{id})*))",
        id = BUILD_IDENTIFIER
    );

    static ref FULL_PLAIN: String = format!("v?{}{}?{}?", *MAIN_VERSION, *PRERELEASE, *BUILD);
    static ref LOOSE_PLAIN: String = format!(
        r"[v=\s]*{}{}?{}?",
        *MAIN_VERSION_LOOSE, *PRERELEASE_LOOSE, *BUILD
    );

    static ref XRANGE_IDENTIFIER: String = format!(r"{}|x|X|\*", NUMERIC_IDENTIFIER);
    static ref XRANGE_IDENTIFIER_LOOSE: String = format!(r"{}|x|X|\*", NUMERIC_IDENTIFIER_LOOSE);

    static ref XRANGE_PLAIN: String = format!(
        r"[v=\s]*({x})(?:\.({x})(?:\.({x})(?:{pre})?{build}?)?)?",
        x = *XRANGE_IDENTIFIER,
        pre = *PRERELEASE,
        build = *BUILD
    );
    static ref XRANGE_PLAIN_LOOSE: String = format!(
        r"[v=\s]*({x})(?:\.({x})(?:\.({x})(?:{pre})?{build}?)?)?",
        x = *XRANGE_IDENTIFIER_LOOSE,
        pre = *PRERELEASE_LOOSE,
        build = *BUILD
    );

    static ref COERCE_PLAIN: String = format!(
        r"(^|[^0-9])([0-9]{{1,{n}}})(?:\.([0-9]{{1,{n}}}))?(?:\.([0-9]{{1,{n}}}))?",
        n = MAX_SAFE_COMPONENT_LENGTH
    );

    // Versions
    pub(crate) static ref FULL_RE: Regex = compile(&format!("^{}$", *FULL_PLAIN));
    pub(crate) static ref LOOSE_RE: Regex = compile(&format!("^{}$", *LOOSE_PLAIN));
    pub(crate) static ref PRERELEASE_RE: Regex = compile(&*PRERELEASE);
    pub(crate) static ref PRERELEASE_LOOSE_RE: Regex = compile(&*PRERELEASE_LOOSE);
    pub(crate) static ref BUILD_RE: Regex = compile(&*BUILD);

    // Comparators
    pub(crate) static ref COMPARATOR_RE: Regex = compile(&format!(
        r"^{}\s*({})$|^$",
        GTLT, *FULL_PLAIN
    ));
    pub(crate) static ref COMPARATOR_LOOSE_RE: Regex = compile(&format!(
        r"^{}\s*({})$|^$",
        GTLT, *LOOSE_PLAIN
    ));
    pub(crate) static ref COMPARATOR_TRIM_RE: Regex = compile(&format!(
        r"(\s*){}\s*({}|{})",
        GTLT, *LOOSE_PLAIN, *XRANGE_PLAIN
    ));

    // Shorthand ranges
    pub(crate) static ref XRANGE_RE: Regex = compile(&format!(r"^{}\s*{}$", GTLT, *XRANGE_PLAIN));
    pub(crate) static ref XRANGE_LOOSE_RE: Regex = compile(&format!(r"^{}\s*{}$", GTLT, *XRANGE_PLAIN_LOOSE));
    pub(crate) static ref TILDE_TRIM_RE: Regex = compile(r"(\s*)(?:~>?)\s+");
    pub(crate) static ref TILDE_RE: Regex = compile(&format!("^(?:~>?){}$", *XRANGE_PLAIN));
    pub(crate) static ref TILDE_LOOSE_RE: Regex = compile(&format!("^(?:~>?){}$", *XRANGE_PLAIN_LOOSE));
    pub(crate) static ref CARET_TRIM_RE: Regex = compile(r"(\s*)(?:\^)\s+");
    pub(crate) static ref CARET_RE: Regex = compile(&format!(r"^(?:\^){}$", *XRANGE_PLAIN));
    pub(crate) static ref CARET_LOOSE_RE: Regex = compile(&format!(r"^(?:\^){}$", *XRANGE_PLAIN_LOOSE));
    pub(crate) static ref HYPHEN_RANGE_RE: Regex = compile(&format!(
        r"^\s*({x})\s+-\s+({x})\s*$",
        x = *XRANGE_PLAIN
    ));
    pub(crate) static ref HYPHEN_RANGE_LOOSE_RE: Regex = compile(&format!(
        r"^\s*({x})\s+-\s+({x})\s*$",
        x = *XRANGE_PLAIN_LOOSE
    ));
    pub(crate) static ref STAR_RE: Regex = compile(r"(<|>)?=?\s*\*");
    pub(crate) static ref GTE0_RE: Regex = compile(r"^\s*>=\s*0\.0\.0\s*$");
    pub(crate) static ref GTE0_PRE_RE: Regex = compile(r"^\s*>=\s*0\.0\.0-0\s*$");

    // Coercion
    pub(crate) static ref COERCE_RE: Regex = compile(&format!("{}(?:$|[^0-9])", *COERCE_PLAIN));
    pub(crate) static ref COERCE_FULL_RE: Regex = compile(&format!(
        "{}(?:{})?(?:{})?(?:$|[^0-9])",
        *COERCE_PLAIN, *PRERELEASE, *BUILD
    ));
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid grammar pattern {pattern}: {e}"))
}

/// Version parser for the strict and loose grammars
pub struct VersionParser;

impl VersionParser {
    /// Parse `text` into a [`Version`].
    ///
    /// Strict mode accepts `v?MAJOR.MINOR.PATCH(-PRERELEASE)?(+BUILD)?`
    /// surrounded by optional whitespace; loose mode additionally accepts
    /// leading `=`/`v` runs, leading zeros, and a prerelease without `-`.
    pub fn parse(text: &str, options: &Options) -> Result<Version, SemverError> {
        if text.len() > MAX_LENGTH {
            return Err(SemverError::VersionTooLong {
                length: text.len(),
                max: MAX_LENGTH,
            });
        }

        let re: &Regex = if options.loose { &*LOOSE_RE } else { &*FULL_RE };
        let caps = re
            .captures(text.trim())
            .ok_or_else(|| SemverError::InvalidVersion(text.to_string()))?;

        let component = |index: usize, name: &'static str| -> Result<u64, SemverError> {
            let digits = caps.get(index).map_or("", |m| m.as_str());
            parse_component(digits, name)
        };
        let major = component(1, "major")?;
        let minor = component(2, "minor")?;
        let patch = component(3, "patch")?;

        let prerelease = caps
            .get(4)
            .map(|m| m.as_str().split('.').map(Identifier::parse).collect())
            .unwrap_or_default();
        let build = caps
            .get(5)
            .map(|m| m.as_str().split('.').map(str::to_string).collect())
            .unwrap_or_default();

        Ok(Version::from_parts(major, minor, patch, prerelease, build, Some(text)))
    }

    /// Check whether `text` parses under the given options.
    pub fn is_valid(text: &str, options: &Options) -> bool {
        Self::parse(text, options).is_ok()
    }

    /// Check that a prerelease identifier (as passed to an increment) is a
    /// well-formed dot-separated identifier sequence.
    pub fn is_valid_prerelease(identifier: &str, options: &Options) -> bool {
        let re: &Regex = if options.loose {
            &*PRERELEASE_LOOSE_RE
        } else {
            &*PRERELEASE_RE
        };
        let candidate = format!("-{}", identifier);
        re.captures(&candidate)
            .and_then(|caps| caps.get(1))
            .is_some_and(|m| m.as_str() == identifier)
    }
}

fn parse_component(digits: &str, name: &'static str) -> Result<u64, SemverError> {
    let too_large = || SemverError::ComponentTooLarge {
        component: name,
        value: digits.to_string(),
    };
    let value = digits.parse::<u64>().map_err(|_| too_large())?;
    if value > MAX_SAFE_INTEGER {
        return Err(too_large());
    }
    Ok(value)
}
