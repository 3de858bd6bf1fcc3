//! Parsed ranges and their evaluation

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;

use super::comparator::Comparator;
use super::operator::Operator;
use super::range_parser::parse_comparator_set;
use crate::error::SemverError;
use crate::options::Options;
use crate::version::{Identifier, Version};
use crate::version_parser::VersionParser;

/// Check `version` against every comparator of a conjunction.
///
/// A prerelease candidate additionally needs some comparator in the set
/// carrying a prerelease on the same `major.minor.patch`, unless the
/// options include prereleases.
pub(crate) fn test_set(set: &[Comparator], version: &Version, options: &Options) -> bool {
    if !set.iter().all(|comparator| comparator.test(version)) {
        return false;
    }

    if version.is_prerelease() && !options.include_prerelease {
        return set.iter().filter_map(Comparator::version).any(|allowed| {
            allowed.is_prerelease() && allowed.same_triple(version)
        });
    }

    true
}

/// An AND-combination of comparators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorSet(Vec<Comparator>);

impl ComparatorSet {
    pub fn comparators(&self) -> &[Comparator] {
        &self.0
    }

    /// Whether this set is the lone null comparator `<0.0.0-0`.
    pub fn is_null(&self) -> bool {
        self.0.first().is_some_and(Comparator::is_null_set)
    }

    /// Whether this set is the lone match-all comparator.
    pub fn is_any(&self) -> bool {
        matches!(self.0.as_slice(), [Comparator::Any])
    }

    pub fn test(&self, version: &Version, options: &Options) -> bool {
        test_set(&self.0, version, options)
    }

    /// Every pair of comparators in the set intersects.
    pub fn is_satisfiable(&self, options: &Options) -> bool {
        self.0.iter().enumerate().rev().all(|(index, comparator)| {
            self.0[..index]
                .iter()
                .all(|other| comparator.intersects(other, options))
        })
    }

    pub fn intersects(&self, other: &ComparatorSet, options: &Options) -> bool {
        self.0.iter().all(|lhs| {
            other
                .0
                .iter()
                .all(|rhs| lhs.intersects(rhs, options))
        })
    }

    /// Highest lower bound of the set, with `>` moved to the next version
    /// above it. `None` when the set has no lower bound.
    fn lowest_candidate(&self) -> Option<Version> {
        let mut lowest: Option<Version> = None;

        for comparator in &self.0 {
            let Some((operator, version)) = comparator.as_relation() else {
                continue;
            };
            let candidate = match operator {
                Operator::GreaterThan => {
                    let mut next = version.without_build();
                    if next.is_prerelease() {
                        next.prerelease_mut().push(Identifier::Numeric(0));
                    } else {
                        next.set_main(next.major(), next.minor(), next.patch().saturating_add(1));
                    }
                    next.refresh_raw();
                    next
                }
                Operator::Equal | Operator::GreaterThanOrEqual => version.without_build(),
                Operator::LessThan | Operator::LessThanOrEqual => continue,
            };
            if lowest.as_ref().map_or(true, |current| candidate > *current) {
                lowest = Some(candidate);
            }
        }

        lowest
    }
}

impl fmt::Display for ComparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|comparator| comparator.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{}", joined.trim())
    }
}

/// Direction for [`Range::outside`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hilo {
    /// `>`: above every version in the range
    Greater,
    /// `<`: below every version in the range
    Less,
}

impl FromStr for Hilo {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Hilo::Greater),
            "<" => Ok(Hilo::Less),
            _ => Err(SemverError::InvalidHilo(s.to_string())),
        }
    }
}

/// An OR-combination of comparator sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    raw: String,
    sets: Vec<ComparatorSet>,
    options: Options,
}

impl Range {
    /// Parse a range expression, expanding every shorthand form.
    pub fn parse(text: &str, options: &Options) -> Result<Self, SemverError> {
        let raw = text.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut sets = Vec::new();
        for part in raw.split("||") {
            let comparators = parse_comparator_set(part.trim(), options)?;
            if !comparators.is_empty() {
                sets.push(ComparatorSet(comparators));
            }
        }

        let Some(first) = sets.first().cloned() else {
            return Err(SemverError::InvalidRange(raw));
        };

        if sets.len() > 1 {
            sets.retain(|set| !set.is_null());
            if sets.is_empty() {
                sets.push(first);
            } else if let Some(any) = sets.iter().find(|set| set.is_any()).cloned() {
                sets = vec![any];
            }
        }

        Ok(Range {
            raw,
            sets,
            options: *options,
        })
    }

    /// Input text with whitespace runs collapsed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn sets(&self) -> &[ComparatorSet] {
        &self.sets
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn test(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set.test(version, &self.options))
    }

    /// Parse `version` with the range's options and test it; unparseable
    /// input never matches.
    pub fn test_str(&self, version: &str) -> bool {
        match VersionParser::parse(version, &self.options) {
            Ok(version) => self.test(&version),
            Err(err) => {
                debug!("not testing {:?} against {}: {}", version, self, err);
                false
            }
        }
    }

    /// Whether some version could satisfy both ranges.
    pub fn intersects(&self, other: &Range) -> bool {
        self.sets.iter().any(|lhs| {
            lhs.is_satisfiable(&self.options)
                && other.sets.iter().any(|rhs| {
                    rhs.is_satisfiable(&self.options) && lhs.intersects(rhs, &self.options)
                })
        })
    }

    /// Lowest version that satisfies the range, derived from the bounds of
    /// its satisfiable sets.
    pub fn min_version(&self) -> Option<Version> {
        let zero = Version::new(0, 0, 0);
        if self.test(&zero) {
            return Some(zero);
        }
        let zero_pre = Version::from_parts(0, 0, 0, vec![Identifier::Numeric(0)], Vec::new(), None);
        if self.test(&zero_pre) {
            return Some(zero_pre);
        }

        let lowest = self
            .sets
            .iter()
            .filter(|set| set.is_satisfiable(&self.options))
            .filter_map(ComparatorSet::lowest_candidate)
            .reduce(|lowest, candidate| if lowest > candidate { candidate } else { lowest })?;

        self.test(&lowest).then_some(lowest)
    }

    /// Whether `version` lies entirely above (`Greater`) or below (`Less`)
    /// every version the range admits.
    pub fn outside(&self, version: &Version, hilo: Hilo) -> bool {
        if self.test(version) {
            return false;
        }

        let (toward, strict, inclusive) = match hilo {
            Hilo::Greater => (
                Ordering::Greater,
                Operator::GreaterThan,
                Operator::GreaterThanOrEqual,
            ),
            Hilo::Less => (Ordering::Less, Operator::LessThan, Operator::LessThanOrEqual),
        };
        let floor = Comparator::floor();

        for set in &self.sets {
            let mut high: Option<(Operator, &Version)> = None;
            let mut low: Option<(Operator, &Version)> = None;

            for comparator in set.comparators() {
                let comparator = if comparator.is_any() { &floor } else { comparator };
                let Some(current) = comparator.as_relation() else {
                    continue;
                };
                let (_, high_version) = *high.get_or_insert(current);
                let (_, low_version) = *low.get_or_insert(current);
                if current.1.cmp(high_version) == toward {
                    high = Some(current);
                } else if current.1.cmp(low_version) == toward.reverse() {
                    low = Some(current);
                }
            }

            let (Some((high_op, _)), Some((low_op, low_version))) = (high, low) else {
                continue;
            };

            // the range reaches past the version in that direction
            if high_op == strict || high_op == inclusive {
                return false;
            }

            let ordering = version.cmp(low_version);
            if (low_op == Operator::Equal || low_op == strict) && ordering != toward {
                return false;
            }
            if low_op == inclusive && ordering == toward.reverse() {
                return false;
            }
        }

        true
    }

    /// Comparator strings per set, match-all rendered as `""`.
    pub fn to_comparators(&self) -> Vec<Vec<String>> {
        self.sets
            .iter()
            .map(|set| set.to_string().split(' ').map(str::to_string).collect())
            .collect()
    }
}

impl FromStr for Range {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s, &Options::default())
    }
}

/// The normalized form: comparators joined by a space, sets by `||`.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .sets
            .iter()
            .map(|set| set.to_string())
            .collect::<Vec<_>>()
            .join("||");
        write!(f, "{}", formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(s: &str) -> Range {
        s.parse().unwrap()
    }

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_format() {
        assert_eq!(r("^1.2.3").to_string(), ">=1.2.3 <2.0.0-0");
        assert_eq!(r("1.x || >=2.5.0 || 5.0.0 - 7.2.3").to_string(), ">=1.0.0 <2.0.0-0||>=2.5.0||>=5.0.0 <=7.2.3");
        assert_eq!(r("").to_string(), "");
        assert_eq!(r("  >=1.0.0   <2.0.0 ").raw(), ">=1.0.0 <2.0.0");
    }

    #[test]
    fn test_disjunction_normalization() {
        assert_eq!(r("<0.0.0-0 || ^1.0.0").to_string(), ">=1.0.0 <2.0.0-0");
        assert_eq!(r(">*").to_string(), "<0.0.0-0");
        assert_eq!(r(">* || <x").to_string(), "<0.0.0-0");
        assert_eq!(r("1.2.3 || *").to_string(), "");
        assert_eq!(r("1.2.3 ||").to_string(), "");
    }

    #[test]
    fn test_invalid() {
        assert!("blerg".parse::<Range>().is_err());
        assert!(">=1.2.3 <=>2".parse::<Range>().is_err());
        assert!(matches!(
            Range::parse("blerg", &Options::loose()),
            Err(SemverError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_satisfaction() {
        let positive = [
            ("1.0.0 - 2.0.0", "1.2.3"),
            ("^1.2.3+build", "1.3.0"),
            ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "1.2.3"),
            ("*", "1.2.3"),
            (">=*", "0.2.4"),
            ("", "1.0.0"),
            ("~1.2.1 >=1.2.3", "1.2.3"),
            (">=0.2.3 || <0.0.1", "0.0.0"),
            ("^0.0.1-alpha", "0.0.1-beta"),
            ("~v0.5.4-pre", "0.5.5"),
            ("=0.7.x", "0.7.2"),
            ("<=0.7.x", "0.7.2"),
            ("<1.2", "1.1.1"),
            ("2.x.x", "2.1.3"),
            ("^1.2.3", "1.8.1"),
            ("^0.1.2", "0.1.2"),
        ];
        for (range, version) in positive {
            assert!(r(range).test(&v(version)), "{version} satisfies {range}");
        }

        let negative = [
            ("1.0.0 - 2.0.0", "2.2.3"),
            ("^1.2.3+build", "2.0.0"),
            ("^1.2.3", "1.2.3-beta"),
            ("<1.2.3", "1.2.3-beta"),
            ("^1.2.3", "2.0.0-alpha"),
            ("=0.7.x", "0.8.2"),
            ("<1", "1.0.0beta"),
            ("~1.2.3", "1.3.0"),
            (">1.2", "1.2.8"),
            ("^0.0.3", "0.0.4"),
            ("~0.5.4-beta", "0.5.4-alpha"),
        ];
        for (range, version) in negative {
            assert!(!r(range).test_str(version), "{version} does not satisfy {range}");
        }
    }

    #[test]
    fn test_include_prerelease() {
        let options = Options::include_prerelease();
        let range = Range::parse("^1.2.3", &options).unwrap();
        assert!(range.test(&v("1.5.0-beta")));
        assert!(!range.test(&v("2.0.0-alpha")));
        assert!(!r("^1.2.3").test(&v("1.5.0-beta")));
    }

    #[test]
    fn test_intersects() {
        let cases = [
            ("1.3.0 || <1.0.0 >2.0.0", "1.3.0 || <1.0.0 >2.0.0", true),
            ("<1.0.0 >2.0.0", ">0.0.0", false),
            (">=1.0.0 <2.0.0", ">=1.5.0", true),
            ("^1.0.0", "^2.0.0", false),
            ("~1.2.3", "1.2.x", true),
            ("*", "<0.0.0-0", false),
            ("1.x", "*", true),
            ("1.2.3-beta.1", "*", false),
            ("1.2.3-beta.1", ">= 1.2.3 || *", false),
            ("1.2.3-0", "*", false),
            ("1.2.3", "*", true),
        ];
        for (a, b, expected) in cases {
            assert_eq!(r(a).intersects(&r(b)), expected, "{a} ∩ {b}");
            assert_eq!(r(b).intersects(&r(a)), expected, "{b} ∩ {a}");
        }
    }

    #[test]
    fn test_min_version() {
        let cases = [
            ("*", Some("0.0.0")),
            ("^1.2.3", Some("1.2.3")),
            (">1.2.3", Some("1.2.4")),
            (">1.2.3-beta", Some("1.2.3-beta.0")),
            ("<1.0.0", Some("0.0.0")),
            (">=1.0.0 <1.1.0 || >=0.5.0 <0.6.0", Some("0.5.0")),
            ("1.0.0 - 2.0.0 || >=0.1.0", Some("0.1.0")),
            (">4.0.0 <3.0.0", None),
            (">4.0.0 <3.0.0 || >=5.0.0", Some("5.0.0")),
            (">=3.0.0 <=2.0.0 || >1.2.3 <2", Some("1.2.4")),
            (">=1.0.0-alpha", Some("1.0.0-alpha")),
            ("<0.0.0-0", None),
        ];
        for (range, expected) in cases {
            assert_eq!(
                r(range).min_version().map(|v| v.to_string()).as_deref(),
                expected,
                "min version of {range}"
            );
        }
    }

    #[test]
    fn test_outside() {
        let range = r("~1.2.3");
        assert!(range.outside(&v("1.3.0"), Hilo::Greater));
        assert!(!range.outside(&v("1.2.5"), Hilo::Greater));
        assert!(range.outside(&v("1.2.0"), Hilo::Less));
        assert!(!range.outside(&v("1.3.0"), Hilo::Less));

        assert!(r("<1.0.0").outside(&v("1.0.0"), Hilo::Greater));
        assert!(!r(">=1.0.0").outside(&v("2.0.0"), Hilo::Greater));
        assert!(!r("*").outside(&v("1.0.0"), Hilo::Less));
        assert!(r("1.0.0 - 2.0.0").outside(&v("0.9.0"), Hilo::Less));
        assert!(!r("1.0.0 - 2.0.0").outside(&v("0.9.0"), Hilo::Greater));
    }

    #[test]
    fn test_hilo() {
        assert_eq!(">".parse::<Hilo>().unwrap(), Hilo::Greater);
        assert_eq!("<".parse::<Hilo>().unwrap(), Hilo::Less);
        assert!(matches!("=".parse::<Hilo>(), Err(SemverError::InvalidHilo(_))));
    }

    #[test]
    fn test_to_comparators() {
        assert_eq!(
            r("1.0.0 || 1.2 - 1.3").to_comparators(),
            vec![vec!["1.0.0"], vec![">=1.2.0", "<1.4.0-0"]]
        );
        assert_eq!(r("*").to_comparators(), vec![vec![""]]);
    }
}
