//! Shorter equivalent ranges over a known list of versions

use super::range::Range;
use crate::error::SemverError;
use crate::version::Version;
use crate::version_parser::VersionParser;

/// Rewrite `range` as runs over `versions`.
///
/// The versions are sorted, each maximal run of satisfying versions is
/// rendered as `v`, `*`, `>=min`, `<=max` or `min - max`, and the runs are
/// joined with ` || `. The rewrite is only equivalent over `versions`. The
/// original text is returned when the rewrite is not shorter.
pub fn simplify(versions: &[&str], range: &Range, original: &str) -> Result<String, SemverError> {
    let mut parsed: Vec<(Version, &str)> = versions
        .iter()
        .enumerate()
        .map(|(index, text)| {
            VersionParser::parse(text, range.options())
                .map(|version| (version, *text))
                .map_err(|err| err.at_index(index))
        })
        .collect::<Result<_, _>>()?;
    parsed.sort_by(|(a, _), (b, _)| a.cmp(b));

    let Some((_, lowest)) = parsed.first() else {
        return Ok(original.to_string());
    };
    let lowest = *lowest;

    let mut runs: Vec<(&str, Option<&str>)> = Vec::new();
    let mut first: Option<&str> = None;
    let mut prev: Option<&str> = None;
    for &(ref version, text) in &parsed {
        if range.test(version) {
            prev = Some(text);
            first.get_or_insert(text);
        } else {
            if let (Some(first), Some(prev)) = (first, prev) {
                runs.push((first, Some(prev)));
            }
            first = None;
            prev = None;
        }
    }
    if let Some(first) = first {
        runs.push((first, None));
    }
    // an empty rewrite would read as match-all
    if runs.is_empty() {
        return Ok(original.to_string());
    }

    let simplified = runs
        .iter()
        .map(|&(min, max)| match max {
            Some(max) if min == max => min.to_string(),
            None if min == lowest => "*".to_string(),
            None => format!(">={}", min),
            Some(max) if min == lowest => format!("<={}", max),
            Some(max) => format!("{} - {}", min, max),
        })
        .collect::<Vec<_>>()
        .join(" || ");

    if simplified.len() < original.len() {
        Ok(simplified)
    } else {
        Ok(original.to_string())
    }
}
