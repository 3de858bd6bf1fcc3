//! Lower and upper bounds of a comparator set

use std::cmp::Ordering;
use std::fmt;

use super::comparator::Comparator;
use super::operator::Operator;
use crate::version::Version;

/// A directional comparator (`>`, `>=`, `<`, `<=`) viewed as the edge of an
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound<'a> {
    operator: Operator,
    version: &'a Version,
}

impl<'a> Bound<'a> {
    /// The lower bound a `>`/`>=` comparator describes.
    pub fn lower(comparator: &'a Comparator) -> Option<Self> {
        match comparator {
            Comparator::Relation { operator, version } if operator.is_greater() => Some(Bound {
                operator: *operator,
                version,
            }),
            _ => None,
        }
    }

    /// The upper bound a `<`/`<=` comparator describes.
    pub fn upper(comparator: &'a Comparator) -> Option<Self> {
        match comparator {
            Comparator::Relation { operator, version } if operator.is_less() => Some(Bound {
                operator: *operator,
                version,
            }),
            _ => None,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Get the version
    pub fn version(&self) -> &'a Version {
        self.version
    }

    /// Check if the bound is inclusive
    pub fn is_inclusive(&self) -> bool {
        self.operator.is_inclusive()
    }

    /// The comparator this bound came from.
    pub fn to_comparator(&self) -> Comparator {
        Comparator::new(self.operator, self.version.clone())
    }

    /// As lower bounds, does `self` admit strictly fewer versions than
    /// `other`? A higher version wins; on a tie the exclusive bound wins.
    pub fn is_tighter_lower_than(&self, other: &Bound) -> bool {
        match self.version.cmp(other.version) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => !self.is_inclusive() && other.is_inclusive(),
        }
    }

    /// As upper bounds, does `self` admit strictly fewer versions than
    /// `other`? A lower version wins; on a tie the exclusive bound wins.
    pub fn is_tighter_upper_than(&self, other: &Bound) -> bool {
        match self.version.cmp(other.version) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => !self.is_inclusive() && other.is_inclusive(),
        }
    }
}

impl fmt::Display for Bound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.version,
            if self.is_inclusive() {
                "inclusive"
            } else {
                "exclusive"
            }
        )
    }
}

/// Fold `candidate` into the running lower bound, keeping the tighter one.
pub(crate) fn tighter_lower<'a>(current: Option<Bound<'a>>, candidate: Bound<'a>) -> Bound<'a> {
    match current {
        Some(current) if !candidate.is_tighter_lower_than(&current) => current,
        _ => candidate,
    }
}

/// Fold `candidate` into the running upper bound, keeping the tighter one.
pub(crate) fn tighter_upper<'a>(current: Option<Bound<'a>>, candidate: Bound<'a>) -> Bound<'a> {
    match current {
        Some(current) if !candidate.is_tighter_upper_than(&current) => current,
        _ => candidate,
    }
}
