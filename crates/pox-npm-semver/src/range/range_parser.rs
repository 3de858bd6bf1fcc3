//! Shorthand expansion for one comparator set
//!
//! A set such as `^1.2 || ...`'s `^1.2` goes through a fixed sequence of
//! textual rewrites (hyphen ranges, operator trimming, carets, tildes,
//! x-ranges, stars) until only plain `<op><version>` tokens remain, which
//! are then parsed into [`Comparator`]s.

use log::trace;
use regex::{Captures, Regex};

use super::comparator::Comparator;
use crate::error::SemverError;
use crate::options::Options;
use crate::version_parser::{
    BUILD_RE, CARET_LOOSE_RE, CARET_RE, CARET_TRIM_RE, COMPARATOR_LOOSE_RE, COMPARATOR_TRIM_RE,
    GTE0_PRE_RE, GTE0_RE, HYPHEN_RANGE_LOOSE_RE, HYPHEN_RANGE_RE, STAR_RE, TILDE_LOOSE_RE,
    TILDE_RE, TILDE_TRIM_RE, XRANGE_LOOSE_RE, XRANGE_RE,
};

/// Expand and parse one `||`-free comparator set.
///
/// The result is de-duplicated by comparator value; a set containing the
/// null set collapses to it and a match-all comparator is dropped when
/// anything else remains. In loose mode tokens that are not comparators
/// are skipped, so the result may be empty.
pub(crate) fn parse_comparator_set(
    text: &str,
    options: &Options,
) -> Result<Vec<Comparator>, SemverError> {
    let hyphen: &Regex = if options.loose {
        &*HYPHEN_RANGE_LOOSE_RE
    } else {
        &*HYPHEN_RANGE_RE
    };
    let expanded = hyphen.replace(text, |caps: &Captures| {
        replace_hyphen(caps, options.include_prerelease)
    });
    trace!("hyphen replace: {}", expanded);

    // `> 1.2.3 < 1.2.5` => `>1.2.3 <1.2.5`
    let expanded = COMPARATOR_TRIM_RE.replace_all(&expanded, "${1}${2}${3}");
    trace!("comparator trim: {}", expanded);

    // `~ 1.2.3` => `~1.2.3`
    let expanded = TILDE_TRIM_RE.replace_all(&expanded, "${1}~");
    trace!("tilde trim: {}", expanded);

    // `^ 1.2.3` => `^1.2.3`
    let expanded = CARET_TRIM_RE.replace_all(&expanded, "${1}^");
    trace!("caret trim: {}", expanded);

    let rewritten = expanded
        .split(' ')
        .map(|comp| expand_comparator(comp, options))
        .collect::<Vec<_>>()
        .join(" ");

    let mut tokens: Vec<String> = rewritten
        .split_whitespace()
        .map(|comp| replace_gte0(comp, options))
        .collect();
    if tokens.is_empty() {
        tokens.push(String::new());
    }
    trace!("comparator tokens: {:?}", tokens);

    if options.loose {
        tokens.retain(|comp| COMPARATOR_LOOSE_RE.is_match(comp));
    }

    let comparators = tokens
        .iter()
        .map(|comp| Comparator::parse(comp, options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut set: Vec<Comparator> = Vec::with_capacity(comparators.len());
    for comparator in comparators {
        if comparator.is_null_set() {
            return Ok(vec![comparator]);
        }
        if !set.contains(&comparator) {
            set.push(comparator);
        }
    }
    if set.len() > 1 {
        set.retain(|comparator| !comparator.is_any());
    }

    Ok(set)
}

/// Rewrite one whitespace-free token into plain comparators.
fn expand_comparator(comp: &str, options: &Options) -> String {
    let comp = BUILD_RE.replace(comp, "");
    trace!("comparator: {}", comp);
    let comp = replace_carets(&comp, options);
    trace!("caret: {}", comp);
    let comp = replace_tildes(&comp, options);
    trace!("tilde: {}", comp);
    let comp = replace_x_ranges(&comp, options);
    trace!("xrange: {}", comp);
    let comp = replace_stars(&comp);
    trace!("stars: {}", comp);
    comp
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Missing, `x`, `X` or `*`.
fn is_x(id: &str) -> bool {
    id.is_empty() || id.eq_ignore_ascii_case("x") || id == "*"
}

/// Decimal successor of a digit string, leading zeros dropped.
fn next_number(digits: &str) -> String {
    let mut out: Vec<char> = digits.trim_start_matches('0').chars().collect();
    let mut carry = true;
    for digit in out.iter_mut().rev() {
        if !carry {
            break;
        }
        if *digit == '9' {
            *digit = '0';
        } else {
            *digit = char::from(*digit as u8 + 1);
            carry = false;
        }
    }
    if carry {
        out.insert(0, '1');
    }
    out.into_iter().collect()
}

// ^1.2.3 => >=1.2.3 <2.0.0-0
// ^1.2 => >=1.2.0 <2.0.0-0
// ^0.2.3 => >=0.2.3 <0.3.0-0
// ^0.0.3 => >=0.0.3 <0.0.4-0
fn replace_carets(comp: &str, options: &Options) -> String {
    comp.split_whitespace()
        .map(|c| replace_caret(c, options))
        .collect::<Vec<_>>()
        .join(" ")
}

fn replace_caret(comp: &str, options: &Options) -> String {
    let re: &Regex = if options.loose {
        &*CARET_LOOSE_RE
    } else {
        &*CARET_RE
    };
    let z = if options.include_prerelease { "-0" } else { "" };

    re.replace(comp, |caps: &Captures| {
        let (major, minor, patch, pre) = (group(caps, 1), group(caps, 2), group(caps, 3), group(caps, 4));

        if is_x(major) {
            String::new()
        } else if is_x(minor) {
            format!(">={}.0.0{} <{}.0.0-0", major, z, next_number(major))
        } else if is_x(patch) {
            if major == "0" {
                format!(">={}.{}.0{} <{}.{}.0-0", major, minor, z, major, next_number(minor))
            } else {
                format!(">={}.{}.0{} <{}.0.0-0", major, minor, z, next_number(major))
            }
        } else if !pre.is_empty() {
            let lower = format!(">={}.{}.{}-{}", major, minor, patch, pre);
            if major == "0" {
                if minor == "0" {
                    format!("{} <{}.{}.{}-0", lower, major, minor, next_number(patch))
                } else {
                    format!("{} <{}.{}.0-0", lower, major, next_number(minor))
                }
            } else {
                format!("{} <{}.0.0-0", lower, next_number(major))
            }
        } else if major == "0" {
            if minor == "0" {
                format!(
                    ">={}.{}.{}{} <{}.{}.{}-0",
                    major, minor, patch, z, major, minor, next_number(patch)
                )
            } else {
                format!(
                    ">={}.{}.{}{} <{}.{}.0-0",
                    major, minor, patch, z, major, next_number(minor)
                )
            }
        } else {
            format!(">={}.{}.{} <{}.0.0-0", major, minor, patch, next_number(major))
        }
    })
    .into_owned()
}

// ~1.2.3 => >=1.2.3 <1.3.0-0
// ~1.2 => >=1.2.0 <1.3.0-0
// ~1 => >=1.0.0 <2.0.0-0
fn replace_tildes(comp: &str, options: &Options) -> String {
    comp.split_whitespace()
        .map(|c| replace_tilde(c, options))
        .collect::<Vec<_>>()
        .join(" ")
}

fn replace_tilde(comp: &str, options: &Options) -> String {
    let re: &Regex = if options.loose {
        &*TILDE_LOOSE_RE
    } else {
        &*TILDE_RE
    };

    re.replace(comp, |caps: &Captures| {
        let (major, minor, patch, pre) = (group(caps, 1), group(caps, 2), group(caps, 3), group(caps, 4));

        if is_x(major) {
            String::new()
        } else if is_x(minor) {
            format!(">={}.0.0 <{}.0.0-0", major, next_number(major))
        } else if is_x(patch) {
            format!(">={}.{}.0 <{}.{}.0-0", major, minor, major, next_number(minor))
        } else if !pre.is_empty() {
            format!(
                ">={}.{}.{}-{} <{}.{}.0-0",
                major, minor, patch, pre, major, next_number(minor)
            )
        } else {
            format!(
                ">={}.{}.{} <{}.{}.0-0",
                major, minor, patch, major, next_number(minor)
            )
        }
    })
    .into_owned()
}

fn replace_x_ranges(comp: &str, options: &Options) -> String {
    comp.split_whitespace()
        .map(|c| replace_x_range(c, options))
        .collect::<Vec<_>>()
        .join(" ")
}

fn replace_x_range(comp: &str, options: &Options) -> String {
    let re: &Regex = if options.loose {
        &*XRANGE_LOOSE_RE
    } else {
        &*XRANGE_RE
    };

    re.replace(comp.trim(), |caps: &Captures| {
        let mut gtlt = group(caps, 1);
        let (major, minor, patch) = (group(caps, 2), group(caps, 3), group(caps, 4));

        let x_major = is_x(major);
        let x_minor = x_major || is_x(minor);
        let x_patch = x_minor || is_x(patch);
        let any_x = x_patch;

        if gtlt == "=" && any_x {
            gtlt = "";
        }
        // -0 is the lowest possible prerelease
        let mut pr = if options.include_prerelease { "-0" } else { "" };

        if x_major {
            if gtlt == ">" || gtlt == "<" {
                // nothing is allowed
                "<0.0.0-0".to_string()
            } else {
                "*".to_string()
            }
        } else if !gtlt.is_empty() && any_x {
            let mut major = major.to_string();
            let mut minor = if x_minor { "0".to_string() } else { minor.to_string() };

            if gtlt == ">" {
                // >1 => >=2.0.0, >1.2 => >=1.3.0
                gtlt = ">=";
                if x_minor {
                    major = next_number(&major);
                    minor = "0".to_string();
                } else {
                    minor = next_number(&minor);
                }
            } else if gtlt == "<=" {
                // <=0.7.x is actually <0.8.0-0
                gtlt = "<";
                if x_minor {
                    major = next_number(&major);
                } else {
                    minor = next_number(&minor);
                }
            }
            if gtlt == "<" {
                pr = "-0";
            }
            format!("{}{}.{}.0{}", gtlt, major, minor, pr)
        } else if x_minor {
            format!(">={}.0.0{} <{}.0.0-0", major, pr, next_number(major))
        } else if x_patch {
            format!(
                ">={}.{}.0{} <{}.{}.0-0",
                major, minor, pr, major, next_number(minor)
            )
        } else {
            group(caps, 0).to_string()
        }
    })
    .into_owned()
}

/// Drop the first `*` along with its operator.
fn replace_stars(comp: &str) -> String {
    STAR_RE.replace(comp.trim(), "").into_owned()
}

/// `>=0.0.0` (or `>=0.0.0-0` with prereleases) matches everything.
fn replace_gte0(comp: &str, options: &Options) -> String {
    let re: &Regex = if options.include_prerelease {
        &*GTE0_PRE_RE
    } else {
        &*GTE0_RE
    };
    re.replace(comp.trim(), "").into_owned()
}

// 1.2 - 3.4.5 => >=1.2.0 <=3.4.5
// 1.2.3 - 3.4 => >=1.2.0 <3.5.0-0
// 1.2 - 3.4 => >=1.2.0 <3.5.0-0
fn replace_hyphen(caps: &Captures, include_prerelease: bool) -> String {
    let z = if include_prerelease { "-0" } else { "" };
    let from = group(caps, 1);
    let (from_major, from_minor, from_patch, from_pre) =
        (group(caps, 2), group(caps, 3), group(caps, 4), group(caps, 5));
    let to = group(caps, 7);
    let (to_major, to_minor, to_patch, to_pre) =
        (group(caps, 8), group(caps, 9), group(caps, 10), group(caps, 11));

    let lower = if is_x(from_major) {
        String::new()
    } else if is_x(from_minor) {
        format!(">={}.0.0{}", from_major, z)
    } else if is_x(from_patch) {
        format!(">={}.{}.0{}", from_major, from_minor, z)
    } else if !from_pre.is_empty() {
        format!(">={}", from)
    } else {
        format!(">={}{}", from, z)
    };

    let upper = if is_x(to_major) {
        String::new()
    } else if is_x(to_minor) {
        format!("<{}.0.0-0", next_number(to_major))
    } else if is_x(to_patch) {
        format!("<{}.{}.0-0", to_major, next_number(to_minor))
    } else if !to_pre.is_empty() {
        format!("<={}.{}.{}-{}", to_major, to_minor, to_patch, to_pre)
    } else if include_prerelease {
        format!("<{}.{}.{}-0", to_major, to_minor, next_number(to_patch))
    } else {
        format!("<={}", to)
    };

    format!("{} {}", lower, upper).trim().to_string()
}
