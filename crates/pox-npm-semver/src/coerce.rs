//! Best-effort version extraction from arbitrary text

use regex::{Captures, Regex};

use crate::options::Options;
use crate::version::Version;
use crate::version_parser::{VersionParser, COERCE_FULL_RE, COERCE_RE};

/// Pull the first `MAJOR(.MINOR)?(.PATCH)?` run out of `text`, padding the
/// missing components with zero.
///
/// With `rtl` the scan prefers the run that ends closest to the end of the
/// input. With `include_prerelease` a trailing prerelease and build suffix
/// are kept. Returns `None` when no digit run is found.
pub fn coerce(text: &str, options: &Options) -> Option<Version> {
    let re: &Regex = if options.include_prerelease {
        &*COERCE_FULL_RE
    } else {
        &*COERCE_RE
    };

    let caps = if options.rtl {
        scan_right_to_left(re, text)
    } else {
        re.captures(text)
    }?;

    let major = caps.get(2)?.as_str();
    let minor = caps.get(3).map_or("0", |m| m.as_str());
    let patch = caps.get(4).map_or("0", |m| m.as_str());

    let mut candidate = format!("{}.{}.{}", major, minor, patch);
    if options.include_prerelease {
        if let Some(pre) = caps.get(5) {
            candidate.push('-');
            candidate.push_str(pre.as_str());
        }
        if let Some(build) = caps.get(6) {
            candidate.push('+');
            candidate.push_str(build.as_str());
        }
    }

    match VersionParser::parse(&candidate, options) {
        Ok(version) => Some(version),
        Err(err) => {
            log::debug!("coerced {:?} from {:?} but it does not parse: {}", candidate, text, err);
            None
        }
    }
}

/// Walk every candidate run from the left, restarting just after each
/// major component, and keep the longest run ending at the rightmost
/// position. Stops early once a run reaches the end of the input.
fn scan_right_to_left<'t>(re: &Regex, text: &'t str) -> Option<Captures<'t>> {
    let mut best: Option<Captures<'t>> = None;
    let mut start = 0;

    while start <= text.len() {
        if best
            .as_ref()
            .and_then(|caps| caps.get(0))
            .is_some_and(|m| m.end() == text.len())
        {
            break;
        }

        let Some(next) = re.captures_at(text, start) else {
            break;
        };
        let Some(major) = next.get(2) else {
            break;
        };
        let next_end = next.get(0).map_or(0, |m| m.end());
        let best_end = best.as_ref().and_then(|caps| caps.get(0)).map(|m| m.end());

        start = major.end();
        if best_end != Some(next_end) {
            best = Some(next);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerced(text: &str, options: &Options) -> Option<String> {
        coerce(text, options).map(|v| v.to_string())
    }

    #[test]
    fn test_coerce_ltr() {
        let options = Options::default();
        assert_eq!(coerced("v3.4", &options).as_deref(), Some("3.4.0"));
        assert_eq!(coerced("1", &options).as_deref(), Some("1.0.0"));
        assert_eq!(coerced("1.2.3.4", &options).as_deref(), Some("1.2.3"));
        assert_eq!(coerced("release-2.5.1-final.tar.gz", &options).as_deref(), Some("2.5.1"));
        assert_eq!(coerced("version one", &options), None);
        assert_eq!(coerced("", &options), None);
        assert_eq!(coerced("1.2.3-beta.1+b", &options).as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_coerce_digit_run_limit() {
        let options = Options::default();
        let sixteen = "9".repeat(16);
        let seventeen = "9".repeat(17);
        // sixteen nines is above the safe integer bound, so it cannot parse
        assert_eq!(coerced(&sixteen, &options), None);
        assert_eq!(coerced(&seventeen, &options), None);
        assert_eq!(
            coerced(&format!("{}.1", "1".repeat(16)), &options).as_deref(),
            Some("1111111111111111.1.0")
        );
    }

    #[test]
    fn test_coerce_rtl() {
        let options = Options::default().with_rtl(true);
        assert_eq!(coerced("1.2.3.4", &options).as_deref(), Some("2.3.4"));
        assert_eq!(coerced("1.2.3/5.6.7", &options).as_deref(), Some("5.6.7"));
        assert_eq!(coerced("v3.4 and 5", &options).as_deref(), Some("5.0.0"));
        assert_eq!(coerced("4.5 next", &options).as_deref(), Some("4.5.0"));
        assert_eq!(coerced("no digits", &options), None);
    }

    #[test]
    fn test_coerce_include_prerelease() {
        let options = Options::include_prerelease();
        assert_eq!(coerced("1.2.3-beta.1+b", &options).as_deref(), Some("1.2.3-beta.1"));
        assert_eq!(
            coerce("app v2.0.0-rc.1+sha.5 built", &options).map(|v| v.raw().to_string()).as_deref(),
            Some("2.0.0-rc.1+sha.5")
        );
        assert_eq!(coerced("2.0", &options).as_deref(), Some("2.0.0"));
    }
}
