//! Single relational atom of a range

use std::fmt;

use regex::Regex;

use super::operator::Operator;
use super::range::test_set;
use crate::error::SemverError;
use crate::options::Options;
use crate::version::{Identifier, Version};
use crate::version_parser::{VersionParser, COMPARATOR_LOOSE_RE, COMPARATOR_RE};

/// One comparator: either the match-all form (`*` or empty) or an
/// operator paired with a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Matches every version
    Any,
    /// `<op><version>`
    Relation { operator: Operator, version: Version },
}

impl Comparator {
    pub fn new(operator: Operator, version: Version) -> Self {
        Comparator::Relation { operator, version }
    }

    /// `<0.0.0-0`, the comparator nothing can satisfy.
    pub fn null_set() -> Self {
        Comparator::new(Operator::LessThan, zero_prerelease())
    }

    /// `>=0.0.0`
    pub(crate) fn floor() -> Self {
        Comparator::new(Operator::GreaterThanOrEqual, Version::new(0, 0, 0))
    }

    /// `>=0.0.0-0`
    pub(crate) fn floor_with_prerelease() -> Self {
        Comparator::new(Operator::GreaterThanOrEqual, zero_prerelease())
    }

    /// Parse a single comparator such as `>=1.2.3`, `<2.0.0-0` or the empty
    /// string. Internal whitespace is collapsed first.
    pub fn parse(text: &str, options: &Options) -> Result<Self, SemverError> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let re: &Regex = if options.loose {
            &*COMPARATOR_LOOSE_RE
        } else {
            &*COMPARATOR_RE
        };
        let caps = re
            .captures(&text)
            .ok_or_else(|| SemverError::InvalidComparator(text.clone()))?;

        let version = match caps.get(2) {
            Some(m) if !m.as_str().is_empty() => m.as_str(),
            _ => return Ok(Comparator::Any),
        };
        let operator = caps.get(1).map_or("", |m| m.as_str()).parse::<Operator>()?;
        // only the grammar flavour carries over into the comparator version
        let version_options = Options::default().with_loose(options.loose);
        let version = VersionParser::parse(version, &version_options)?;

        Ok(Comparator::new(operator, version))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Comparator::Any)
    }

    pub fn is_null_set(&self) -> bool {
        match self {
            Comparator::Relation { operator, version } => {
                *operator == Operator::LessThan
                    && version.same_triple(&Version::new(0, 0, 0))
                    && version.prerelease() == [Identifier::Numeric(0)]
            }
            Comparator::Any => false,
        }
    }

    /// `None` for the match-all comparator.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Comparator::Relation { operator, .. } => Some(*operator),
            Comparator::Any => None,
        }
    }

    /// `None` for the match-all comparator.
    pub fn version(&self) -> Option<&Version> {
        match self {
            Comparator::Relation { version, .. } => Some(version),
            Comparator::Any => None,
        }
    }

    /// Operator and version of a relation, `None` for match-all.
    pub fn as_relation(&self) -> Option<(Operator, &Version)> {
        match self {
            Comparator::Relation { operator, version } => Some((*operator, version)),
            Comparator::Any => None,
        }
    }

    /// Check `version` against this comparator alone, without the range
    /// level prerelease rule.
    pub fn test(&self, candidate: &Version) -> bool {
        match self {
            Comparator::Any => true,
            Comparator::Relation { operator, version } => operator.holds(candidate.cmp(version)),
        }
    }

    /// Whether some version satisfies both comparators.
    pub fn intersects(&self, other: &Comparator, options: &Options) -> bool {
        if self.is_null_set() || other.is_null_set() {
            return false;
        }
        // an exact version still has to pass the prerelease rule of the
        // other side, even when that side is match-all
        if let Some((Operator::Equal, version)) = self.as_relation() {
            return test_set(std::slice::from_ref(other), version, options);
        }
        if let Some((Operator::Equal, version)) = other.as_relation() {
            return test_set(std::slice::from_ref(self), version, options);
        }

        let (Some((lhs_op, lhs)), Some((rhs_op, rhs))) = (self.as_relation(), other.as_relation())
        else {
            return true;
        };

        // without prereleases nothing sits below 0.0.0
        if !options.include_prerelease && (self.is_below_zero() || other.is_below_zero()) {
            return false;
        }

        if lhs_op.is_greater() && rhs_op.is_greater() {
            return true;
        }
        if lhs_op.is_less() && rhs_op.is_less() {
            return true;
        }
        if lhs == rhs && lhs_op.is_inclusive() && rhs_op.is_inclusive() {
            return true;
        }
        if lhs < rhs && lhs_op.is_greater() && rhs_op.is_less() {
            return true;
        }
        if lhs > rhs && lhs_op.is_less() && rhs_op.is_greater() {
            return true;
        }
        false
    }

    /// `<0.0.0` with or without a prerelease tag.
    fn is_below_zero(&self) -> bool {
        matches!(
            self,
            Comparator::Relation { operator: Operator::LessThan, version }
                if version.same_triple(&Version::new(0, 0, 0))
        )
    }
}

fn zero_prerelease() -> Version {
    Version::from_parts(0, 0, 0, vec![Identifier::Numeric(0)], Vec::new(), None)
}

/// The comparator value: empty for match-all, the bare version for `=`.
impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Any => Ok(()),
            Comparator::Relation { operator, version } => write!(f, "{}{}", operator, version),
        }
    }
}
