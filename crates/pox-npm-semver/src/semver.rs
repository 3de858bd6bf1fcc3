//! Semver facade providing high-level version operations
//!
//! Every operation takes plain strings plus an [`Options`] bag. Tolerant
//! queries return `Option`/`bool` and swallow malformed input; strict ones
//! return a [`SemverError`].

use std::cmp::Ordering;

use log::debug;

use crate::coerce;
use crate::error::SemverError;
use crate::increment::{PrereleaseBase, ReleaseType};
use crate::options::Options;
use crate::range::{self, Hilo, Range};
use crate::version::{Identifier, Version};
use crate::version_parser::VersionParser;

/// Main facade for semantic versioning operations
pub struct Semver;

impl Semver {
    /// Parse a version, failing on malformed input.
    pub fn parse(version: &str, options: &Options) -> Result<Version, SemverError> {
        VersionParser::parse(version, options)
    }

    /// Parse a version, `None` on malformed input.
    pub fn try_parse(version: &str, options: &Options) -> Option<Version> {
        match VersionParser::parse(version, options) {
            Ok(v) => Some(v),
            Err(err) => {
                debug!("{:?} is not a version: {}", version, err);
                None
            }
        }
    }

    /// The normalized version string, or `None` if it does not parse.
    pub fn valid(version: &str, options: &Options) -> Option<String> {
        Self::try_parse(version, options).map(|v| v.to_string())
    }

    /// Trim, drop leading `=`/`v` characters and normalize.
    pub fn clean(version: &str, options: &Options) -> Option<String> {
        let stripped = version.trim().trim_start_matches(['=', 'v']);
        Self::valid(stripped, options)
    }

    pub fn major(version: &str, options: &Options) -> Result<u64, SemverError> {
        Ok(Self::parse(version, options)?.major())
    }

    pub fn minor(version: &str, options: &Options) -> Result<u64, SemverError> {
        Ok(Self::parse(version, options)?.minor())
    }

    pub fn patch(version: &str, options: &Options) -> Result<u64, SemverError> {
        Ok(Self::parse(version, options)?.patch())
    }

    /// Prerelease identifiers, `None` when there are none or the version
    /// does not parse.
    pub fn prerelease(version: &str, options: &Options) -> Option<Vec<Identifier>> {
        Self::try_parse(version, options)
            .map(|v| v.prerelease().to_vec())
            .filter(|pre| !pre.is_empty())
    }

    fn parse_pair(a: &str, b: &str, options: &Options) -> Result<(Version, Version), SemverError> {
        Ok((Self::parse(a, options)?, Self::parse(b, options)?))
    }

    /// `-1`, `0` or `1` as `a` sorts below, equal to or above `b`. Build
    /// metadata is ignored.
    pub fn compare(a: &str, b: &str, options: &Options) -> Result<i32, SemverError> {
        let (a, b) = Self::parse_pair(a, b, options)?;
        Ok(a.cmp(&b) as i32)
    }

    /// `compare` with the arguments swapped.
    pub fn rcompare(a: &str, b: &str, options: &Options) -> Result<i32, SemverError> {
        Self::compare(b, a, options)
    }

    /// `compare` with ties broken by build metadata.
    pub fn compare_build(a: &str, b: &str, options: &Options) -> Result<i32, SemverError> {
        let (a, b) = Self::parse_pair(a, b, options)?;
        Ok(a.compare_build(&b) as i32)
    }

    /// `compare` using the loose grammar regardless of `options`.
    pub fn compare_loose(a: &str, b: &str) -> Result<i32, SemverError> {
        Self::compare(a, b, &Options::loose())
    }

    fn test_order(
        a: &str,
        b: &str,
        options: &Options,
        accept: impl Fn(Ordering) -> bool,
    ) -> Result<bool, SemverError> {
        let (a, b) = Self::parse_pair(a, b, options)?;
        Ok(accept(a.cmp(&b)))
    }

    /// Check if a > b
    pub fn gt(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        Self::test_order(a, b, options, Ordering::is_gt)
    }

    /// Check if a >= b
    pub fn gte(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        Self::test_order(a, b, options, Ordering::is_ge)
    }

    /// Check if a < b
    pub fn lt(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        Self::test_order(a, b, options, Ordering::is_lt)
    }

    /// Check if a <= b
    pub fn lte(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        Self::test_order(a, b, options, Ordering::is_le)
    }

    /// Check if a == b
    pub fn eq(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        Self::test_order(a, b, options, Ordering::is_eq)
    }

    /// Check if a != b
    pub fn neq(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        Self::test_order(a, b, options, Ordering::is_ne)
    }

    /// Most significant difference between two versions, `None` when they
    /// have equal precedence.
    pub fn diff(a: &str, b: &str, options: &Options) -> Result<Option<ReleaseType>, SemverError> {
        let (a, b) = Self::parse_pair(a, b, options)?;
        let (high, low) = match a.cmp(&b) {
            Ordering::Equal => return Ok(None),
            Ordering::Greater => (&a, &b),
            Ordering::Less => (&b, &a),
        };

        if low.is_prerelease() && !high.is_prerelease() {
            // 1.0.0-1 -> 1.1.1 and 1.0.0-1 -> 2.0.0 are still a major step
            if low.minor() == 0 && low.patch() == 0 {
                return Ok(Some(ReleaseType::Major));
            }
            if low.same_triple(high) {
                if low.minor() != 0 && low.patch() == 0 {
                    return Ok(Some(ReleaseType::Minor));
                }
                return Ok(Some(ReleaseType::Patch));
            }
        }

        let pre = high.is_prerelease();
        let release = if a.major() != b.major() {
            if pre { ReleaseType::PreMajor } else { ReleaseType::Major }
        } else if a.minor() != b.minor() {
            if pre { ReleaseType::PreMinor } else { ReleaseType::Minor }
        } else if a.patch() != b.patch() {
            if pre { ReleaseType::PrePatch } else { ReleaseType::Patch }
        } else {
            ReleaseType::PreRelease
        };
        Ok(Some(release))
    }

    /// Check if a version satisfies a range
    pub fn satisfies(version: &str, range: &str, options: &Options) -> bool {
        let range = match Range::parse(range, options) {
            Ok(r) => r,
            Err(err) => {
                debug!("not a range {:?}: {}", range, err);
                return false;
            }
        };
        range.test_str(version)
    }

    /// The normalized range, `*` when it matches everything, `None` when
    /// it does not parse.
    pub fn valid_range(range: &str, options: &Options) -> Option<String> {
        match Range::parse(range, options) {
            Ok(r) => {
                let formatted = r.to_string();
                Some(if formatted.is_empty() { "*".to_string() } else { formatted })
            }
            Err(err) => {
                debug!("not a range {:?}: {}", range, err);
                None
            }
        }
    }

    fn select_satisfying(
        versions: &[&str],
        range: &str,
        options: &Options,
        replaces: Ordering,
    ) -> Option<String> {
        let range = match Range::parse(range, options) {
            Ok(r) => r,
            Err(err) => {
                debug!("not a range {:?}: {}", range, err);
                return None;
            }
        };

        let mut best: Option<(Version, &str)> = None;
        for &text in versions {
            let Some(version) = Self::try_parse(text, options) else {
                continue;
            };
            if !range.test(&version) {
                continue;
            }
            if best.as_ref().map_or(true, |(current, _)| version.cmp(current) == replaces) {
                best = Some((version, text));
            }
        }

        best.map(|(_, text)| text.to_string())
    }

    /// Highest version in `versions` that satisfies the range, returned as
    /// given.
    pub fn max_satisfying(versions: &[&str], range: &str, options: &Options) -> Option<String> {
        Self::select_satisfying(versions, range, options, Ordering::Greater)
    }

    /// Lowest version in `versions` that satisfies the range, returned as
    /// given.
    pub fn min_satisfying(versions: &[&str], range: &str, options: &Options) -> Option<String> {
        Self::select_satisfying(versions, range, options, Ordering::Less)
    }

    /// Lowest version the range can match, `None` when it matches nothing.
    pub fn min_version(range: &str, options: &Options) -> Result<Option<Version>, SemverError> {
        Ok(Range::parse(range, options)?.min_version())
    }

    /// Whether `version` is above every version the range admits.
    pub fn gtr(version: &str, range: &str, options: &Options) -> Result<bool, SemverError> {
        Self::outside(version, range, ">", options)
    }

    /// Whether `version` is below every version the range admits.
    pub fn ltr(version: &str, range: &str, options: &Options) -> Result<bool, SemverError> {
        Self::outside(version, range, "<", options)
    }

    /// `gtr` for `hilo = ">"`, `ltr` for `hilo = "<"`.
    pub fn outside(
        version: &str,
        range: &str,
        hilo: &str,
        options: &Options,
    ) -> Result<bool, SemverError> {
        let version = Self::parse(version, options)?;
        let range = Range::parse(range, options)?;
        let hilo: Hilo = hilo.parse()?;
        Ok(range.outside(&version, hilo))
    }

    /// Whether some version satisfies both ranges.
    pub fn intersects(a: &str, b: &str, options: &Options) -> Result<bool, SemverError> {
        let a = Range::parse(a, options)?;
        let b = Range::parse(b, options)?;
        Ok(a.intersects(&b))
    }

    /// Whether every version matching `sub` also matches `dom`.
    pub fn subset(sub: &str, dom: &str, options: &Options) -> Result<bool, SemverError> {
        if sub == dom {
            return Ok(true);
        }
        let sub = Range::parse(sub, options)?;
        let dom = Range::parse(dom, options)?;
        Ok(range::is_subset(&sub, &dom, options))
    }

    /// A shorter range matching the same members of `versions`, or the
    /// range text unchanged.
    pub fn simplify_range(
        versions: &[&str],
        range: &str,
        options: &Options,
    ) -> Result<String, SemverError> {
        let parsed = Range::parse(range, options)?;
        range::simplify(versions, &parsed, range)
    }

    /// Comparator strings of the normalized range, one list per set.
    pub fn to_comparators(range: &str, options: &Options) -> Result<Vec<Vec<String>>, SemverError> {
        Ok(Range::parse(range, options)?.to_comparators())
    }

    /// Next version for `release`, failing on any invalid argument.
    pub fn inc(
        version: &str,
        release: &str,
        identifier: Option<&str>,
        base: PrereleaseBase,
        options: &Options,
    ) -> Result<String, SemverError> {
        let release: ReleaseType = release.parse()?;
        let version = Self::parse(version, options)?;
        Ok(version.inc(release, identifier, base, options)?.to_string())
    }

    /// [`Semver::inc`] with failures mapped to `None`.
    pub fn try_inc(
        version: &str,
        release: &str,
        identifier: Option<&str>,
        base: PrereleaseBase,
        options: &Options,
    ) -> Option<String> {
        match Self::inc(version, release, identifier, base, options) {
            Ok(next) => Some(next),
            Err(err) => {
                debug!("cannot increment {:?} by {}: {}", version, release, err);
                None
            }
        }
    }

    /// Best-effort version extraction from arbitrary text.
    pub fn coerce(text: &str, options: &Options) -> Option<Version> {
        coerce::coerce(text, options)
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str], options: &Options) -> Result<Vec<String>, SemverError> {
        Self::usort(versions, options, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str], options: &Options) -> Result<Vec<String>, SemverError> {
        Self::usort(versions, options, false)
    }

    fn usort(versions: &[&str], options: &Options, ascending: bool) -> Result<Vec<String>, SemverError> {
        let mut parsed = versions
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Self::parse(v, options)
                    .map(|version| (version, *v))
                    .map_err(|err| err.at_index(i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // stable, so equal versions keep their input order in both directions
        parsed.sort_by(|(a, _), (b, _)| {
            if ascending {
                a.compare_build(b)
            } else {
                b.compare_build(a)
            }
        });

        Ok(parsed.into_iter().map(|(_, v)| v.to_string()).collect())
    }
}
