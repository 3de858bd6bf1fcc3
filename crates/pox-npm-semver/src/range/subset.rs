//! Range containment

use std::cmp::Ordering;

use super::bound::{tighter_lower, tighter_upper, Bound};
use super::comparator::Comparator;
use super::operator::Operator;
use super::range::{test_set, Range};
use crate::options::Options;
use crate::version::{Identifier, Version};

/// Whether every version matched by `sub` is also matched by `dom`.
///
/// Each set of `sub` has to fit inside some set of `dom`. Sets of `sub`
/// that can match nothing are ignored, unless every set is like that, in
/// which case `sub` is the empty range and trivially a subset.
pub fn is_subset(sub: &Range, dom: &Range, options: &Options) -> bool {
    let mut saw_non_null = false;

    'outer: for sub_set in sub.sets() {
        for dom_set in dom.sets() {
            let contained = simple_subset(sub_set.comparators(), dom_set.comparators(), options);
            saw_non_null = saw_non_null || contained.is_some();
            if contained == Some(true) {
                continue 'outer;
            }
        }
        if saw_non_null {
            return false;
        }
    }

    true
}

fn satisfies_comparator(version: &Version, comparator: &Comparator, options: &Options) -> bool {
    test_set(std::slice::from_ref(comparator), version, options)
}

/// Containment of one conjunction in another.
///
/// `None` means `sub` is unsatisfiable on its own and says nothing about
/// containment.
fn simple_subset(sub: &[Comparator], dom: &[Comparator], options: &Options) -> Option<bool> {
    if sub == dom {
        return Some(true);
    }
    if matches!(sub, [only] if only.is_null_set()) {
        return None;
    }

    let floor = Comparator::floor();
    let floor_with_prerelease = Comparator::floor_with_prerelease();

    let sub: &[Comparator] = match sub {
        [Comparator::Any] => match dom {
            [Comparator::Any] => return Some(true),
            _ if options.include_prerelease => std::slice::from_ref(&floor_with_prerelease),
            _ => std::slice::from_ref(&floor),
        },
        _ => sub,
    };
    let dom: &[Comparator] = match dom {
        [Comparator::Any] if options.include_prerelease => return Some(true),
        [Comparator::Any] => std::slice::from_ref(&floor),
        _ => dom,
    };

    let mut gt: Option<Bound> = None;
    let mut lt: Option<Bound> = None;
    let mut exact: Vec<&Version> = Vec::new();
    for comparator in sub {
        if let Some(bound) = Bound::lower(comparator) {
            gt = Some(tighter_lower(gt, bound));
        } else if let Some(bound) = Bound::upper(comparator) {
            lt = Some(tighter_upper(lt, bound));
        } else if let Some(version) = comparator.version() {
            if !exact.contains(&version) {
                exact.push(version);
            }
        }
    }

    if exact.len() > 1 {
        return None;
    }

    let mut gt_lt_equal = false;
    if let (Some(gt), Some(lt)) = (gt, lt) {
        match gt.version().cmp(lt.version()) {
            Ordering::Greater => return None,
            Ordering::Equal => {
                if gt.operator() != Operator::GreaterThanOrEqual
                    || lt.operator() != Operator::LessThanOrEqual
                {
                    return None;
                }
                gt_lt_equal = true;
            }
            Ordering::Less => {}
        }
    }

    if let Some(eq) = exact.first() {
        if gt.is_some_and(|gt| !satisfies_comparator(eq, &gt.to_comparator(), options)) {
            return None;
        }
        if lt.is_some_and(|lt| !satisfies_comparator(eq, &lt.to_comparator(), options)) {
            return None;
        }
        return Some(dom.iter().all(|c| satisfies_comparator(eq, c, options)));
    }

    // a prerelease bound in sub needs a dom comparator with a prerelease
    // on the same tuple
    let mut need_dom_gt_pre = gt
        .filter(|gt| !options.include_prerelease && gt.version().is_prerelease())
        .map(|gt| gt.version());
    let mut need_dom_lt_pre = lt
        .filter(|lt| !options.include_prerelease && lt.version().is_prerelease())
        .map(|lt| lt.version());
    // <1.2.3-0 is the same as <1.2.3
    if let (Some(lt), Some(pre)) = (lt, need_dom_lt_pre) {
        if lt.operator() == Operator::LessThan
            && pre.prerelease() == [Identifier::Numeric(0)]
        {
            need_dom_lt_pre = None;
        }
    }

    let mut has_dom_gt = false;
    let mut has_dom_lt = false;
    for comparator in dom {
        let operator = comparator.operator();
        has_dom_gt = has_dom_gt || operator.is_some_and(|op| op.is_greater());
        has_dom_lt = has_dom_lt || operator.is_some_and(|op| op.is_less());

        let dom_pre_on = |needed: Option<&Version>| {
            needed.is_some_and(|needed| {
                comparator
                    .version()
                    .is_some_and(|v| v.is_prerelease() && v.same_triple(needed))
            })
        };

        if let Some(gt) = gt {
            if dom_pre_on(need_dom_gt_pre) {
                need_dom_gt_pre = None;
            }
            if let Some(dom_bound) = Bound::lower(comparator) {
                if dom_bound.is_tighter_lower_than(&gt) {
                    return Some(false);
                }
            } else if gt.operator() == Operator::GreaterThanOrEqual
                && !satisfies_comparator(gt.version(), comparator, options)
            {
                return Some(false);
            }
        }

        if let Some(lt) = lt {
            if dom_pre_on(need_dom_lt_pre) {
                need_dom_lt_pre = None;
            }
            if let Some(dom_bound) = Bound::upper(comparator) {
                if dom_bound.is_tighter_upper_than(&lt) {
                    return Some(false);
                }
            } else if lt.operator() == Operator::LessThanOrEqual
                && !satisfies_comparator(lt.version(), comparator, options)
            {
                return Some(false);
            }
        }

        if operator == Some(Operator::Equal) && (gt.is_some() || lt.is_some()) && !gt_lt_equal {
            return Some(false);
        }
    }

    // a one-sided sub only fits a dom bounded on the other side when sub
    // is pinned to a single version
    if gt.is_some() && has_dom_lt && lt.is_none() && !gt_lt_equal {
        return Some(false);
    }
    if lt.is_some() && has_dom_gt && gt.is_none() && !gt_lt_equal {
        return Some(false);
    }

    if need_dom_gt_pre.is_some() || need_dom_lt_pre.is_some() {
        return Some(false);
    }

    Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(sub: &str, dom: &str, options: &Options) -> bool {
        let sub = Range::parse(sub, options).unwrap();
        let dom = Range::parse(dom, options).unwrap();
        is_subset(&sub, &dom, options)
    }

    #[test]
    fn test_subset_positive() {
        let options = Options::default();
        let cases = [
            ("1.2.3", "1.2.3"),
            ("1.2.3", "1.x"),
            ("1.2.3 1.2.4", "1.2.7"),
            ("1.2.3 2.x", "2.x"),
            ("^1.2.3", "1.x"),
            ("~1.2.3", "^1.2.0"),
            (">=1.2.3 <1.3.0", ">=1.0.0 <2.0.0"),
            ("1.2.3 - 1.4.0", "^1.0.0"),
            (">2.0.0", ">=1.0.0"),
            (">1.0.0 <1.0.1", "<2.0.0"),
            ("<0.0.0-0", "1.0.0"),
            ("*", "*"),
            ("", "*"),
            ("*", ">=0.0.0"),
            ("<1.2.3-0", "<1.2.3"),
            (">=1.2.3-pre.0", ">=1.2.3-pre"),
            ("1.x || 2.x", "<3.0.0"),
        ];
        for (sub, dom) in cases {
            assert!(subset(sub, dom, &options), "{sub} ⊂ {dom}");
        }
    }

    #[test]
    fn test_subset_negative() {
        let options = Options::default();
        let cases = [
            ("1.x", "1.2.3"),
            ("^1.2.3", "~1.2.3"),
            (">=1.0.0", "<2.0.0"),
            ("<2.0.0", ">=1.0.0"),
            (">=1.2.3-pre", ">=1.0.0"),
            ("*", "1.x"),
            ("1.x || 3.x", "1.x || 2.x"),
            (">=1.0.0 <=2.0.0", ">=1.0.0 <2.0.0"),
            ("*", ">=0.0.0-0 <1.0.0"),
        ];
        for (sub, dom) in cases {
            assert!(!subset(sub, dom, &options), "{sub} ⊄ {dom}");
        }
    }

    #[test]
    fn test_subset_include_prerelease() {
        let options = Options::include_prerelease();
        assert!(subset("*", "*", &options));
        assert!(subset("^1.2.3-pre", "*", &options));
        assert!(subset(">=1.2.3-pre", ">=1.0.0", &options));
        assert!(!subset("*", ">=0.0.0", &options));
    }
}
