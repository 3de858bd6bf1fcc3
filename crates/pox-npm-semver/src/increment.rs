//! Version increments

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SemverError;
use crate::options::Options;
use crate::version::{Identifier, Version};
use crate::version_parser::{VersionParser, MAX_SAFE_INTEGER};

/// Release type driving an increment, also used to report a [`diff`].
///
/// [`diff`]: crate::Semver::diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
    Release,
}

impl ReleaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::PreMajor => "premajor",
            ReleaseType::PreMinor => "preminor",
            ReleaseType::PrePatch => "prepatch",
            ReleaseType::PreRelease => "prerelease",
            ReleaseType::Release => "release",
        }
    }

    /// Whether this release type attaches a prerelease.
    pub fn is_pre(&self) -> bool {
        matches!(
            self,
            ReleaseType::PreMajor
                | ReleaseType::PreMinor
                | ReleaseType::PrePatch
                | ReleaseType::PreRelease
        )
    }
}

impl FromStr for ReleaseType {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(ReleaseType::Major),
            "minor" => Ok(ReleaseType::Minor),
            "patch" => Ok(ReleaseType::Patch),
            "premajor" => Ok(ReleaseType::PreMajor),
            "preminor" => Ok(ReleaseType::PreMinor),
            "prepatch" => Ok(ReleaseType::PrePatch),
            "prerelease" => Ok(ReleaseType::PreRelease),
            "release" => Ok(ReleaseType::Release),
            _ => Err(SemverError::InvalidReleaseType(s.to_string())),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number appended after a prerelease identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PrereleaseBase {
    /// `alpha.0`
    #[default]
    Zero,
    /// `alpha.1`
    One,
    /// `alpha`, no number at all
    Omitted,
}

impl PrereleaseBase {
    fn number(self) -> u64 {
        match self {
            PrereleaseBase::One => 1,
            PrereleaseBase::Zero | PrereleaseBase::Omitted => 0,
        }
    }
}

impl FromStr for PrereleaseBase {
    type Err = SemverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(PrereleaseBase::Zero),
            "1" => Ok(PrereleaseBase::One),
            "false" => Ok(PrereleaseBase::Omitted),
            _ => Err(SemverError::InvalidIdentifier(s.to_string())),
        }
    }
}

impl Version {
    /// Produce the next version for `release`.
    ///
    /// `identifier` names the prerelease for the `pre*` release types and is
    /// validated against the prerelease grammar; an empty identifier counts
    /// as none. Build metadata is carried over into the raw text of the
    /// result but never into its formatted form.
    pub fn inc(
        &self,
        release: ReleaseType,
        identifier: Option<&str>,
        base: PrereleaseBase,
        options: &Options,
    ) -> Result<Version, SemverError> {
        let identifier = identifier.filter(|id| !id.is_empty());

        if release.is_pre() {
            match identifier {
                None if base == PrereleaseBase::Omitted => return Err(SemverError::EmptyIdentifier),
                Some(id) if !VersionParser::is_valid_prerelease(id, options) => {
                    return Err(SemverError::InvalidIdentifier(id.to_string()));
                }
                _ => {}
            }
        }

        let mut next = self.clone();
        let (major, minor, patch) = (self.major(), self.minor(), self.patch());
        let has_pre = self.is_prerelease();

        match release {
            ReleaseType::PreMajor => {
                next.set_main(bump(major, "major")?, 0, 0);
                next.set_prerelease(Vec::new());
                bump_prerelease(&mut next, identifier, base)?;
            }
            ReleaseType::PreMinor => {
                next.set_main(major, bump(minor, "minor")?, 0);
                next.set_prerelease(Vec::new());
                bump_prerelease(&mut next, identifier, base)?;
            }
            ReleaseType::PrePatch => {
                next.set_main(major, minor, bump(patch, "patch")?);
                next.set_prerelease(Vec::new());
                bump_prerelease(&mut next, identifier, base)?;
            }
            ReleaseType::PreRelease => {
                if !has_pre {
                    next.set_main(major, minor, bump(patch, "patch")?);
                }
                bump_prerelease(&mut next, identifier, base)?;
            }
            ReleaseType::Release => {
                next.set_prerelease(Vec::new());
            }
            ReleaseType::Major => {
                // 1.0.0-5 is released as 1.0.0
                let major = if minor != 0 || patch != 0 || !has_pre {
                    bump(major, "major")?
                } else {
                    major
                };
                next.set_main(major, 0, 0);
                next.set_prerelease(Vec::new());
            }
            ReleaseType::Minor => {
                let minor = if patch != 0 || !has_pre {
                    bump(minor, "minor")?
                } else {
                    minor
                };
                next.set_main(major, minor, 0);
                next.set_prerelease(Vec::new());
            }
            ReleaseType::Patch => {
                let patch = if has_pre { patch } else { bump(patch, "patch")? };
                next.set_main(major, minor, patch);
                next.set_prerelease(Vec::new());
            }
        }

        next.refresh_raw();
        Ok(next)
    }
}

/// Next value of a main component, bounded like parsed components.
fn bump(value: u64, component: &'static str) -> Result<u64, SemverError> {
    value
        .checked_add(1)
        .filter(|next| *next <= MAX_SAFE_INTEGER)
        .ok_or_else(|| SemverError::ComponentTooLarge {
            component,
            value: value.to_string(),
        })
}

/// Advance (or start) the prerelease sequence of `version`.
fn bump_prerelease(
    version: &mut Version,
    identifier: Option<&str>,
    base: PrereleaseBase,
) -> Result<(), SemverError> {
    let base_number = base.number();
    let prerelease = version.prerelease_mut();
    let last_numeric = prerelease.iter().rposition(|id| id.is_numeric());

    if prerelease.is_empty() {
        prerelease.push(Identifier::Numeric(base_number));
    } else if let Some(position) = last_numeric {
        if let Some(Identifier::Numeric(n)) = prerelease.get_mut(position) {
            *n += 1;
        }
    } else {
        if base == PrereleaseBase::Omitted {
            let joined = prerelease
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".");
            if identifier == Some(joined.as_str()) {
                return Err(SemverError::IdentifierExists(joined));
            }
        }
        prerelease.push(Identifier::Numeric(base_number));
    }

    if let Some(id) = identifier {
        let named = Identifier::parse(id);
        let fresh = if base == PrereleaseBase::Omitted {
            vec![named.clone()]
        } else {
            vec![named.clone(), Identifier::Numeric(base_number)]
        };
        // keep the bumped sequence only when it already continues this
        // identifier with a number
        let continues = prerelease.first() == Some(&named)
            && prerelease.get(1).is_some_and(Identifier::is_numeric);
        if !continues {
            *prerelease = fresh;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inc(version: &str, release: &str, identifier: Option<&str>, base: PrereleaseBase) -> Option<String> {
        let options = Options::default();
        let release = release.parse::<ReleaseType>().ok()?;
        Version::parse(version, &options)
            .and_then(|v| v.inc(release, identifier, base, &options))
            .map(|v| v.to_string())
            .ok()
    }

    fn inc_simple(version: &str, release: &str) -> Option<String> {
        inc(version, release, None, PrereleaseBase::Zero)
    }

    #[test]
    fn test_release_type_parse() {
        assert_eq!("premajor".parse::<ReleaseType>().unwrap(), ReleaseType::PreMajor);
        assert_eq!(ReleaseType::PreRelease.to_string(), "prerelease");
        assert!(matches!(
            "fake".parse::<ReleaseType>(),
            Err(SemverError::InvalidReleaseType(_))
        ));
    }

    #[test]
    fn test_inc_main_components() {
        assert_eq!(inc_simple("1.2.3", "major").as_deref(), Some("2.0.0"));
        assert_eq!(inc_simple("1.2.3", "minor").as_deref(), Some("1.3.0"));
        assert_eq!(inc_simple("1.2.3", "patch").as_deref(), Some("1.2.4"));
        assert_eq!(inc_simple("1.2.3-tag", "major").as_deref(), Some("2.0.0"));
        assert_eq!(inc_simple("1.0.0-1", "major").as_deref(), Some("1.0.0"));
        assert_eq!(inc_simple("1.2.0-1", "minor").as_deref(), Some("1.2.0"));
        assert_eq!(inc_simple("1.2.3-1", "minor").as_deref(), Some("1.3.0"));
        assert_eq!(inc_simple("1.2.3-1", "patch").as_deref(), Some("1.2.3"));
        assert_eq!(inc_simple("1.2.3+build", "patch").as_deref(), Some("1.2.4"));
    }

    #[test]
    fn test_inc_pre_types() {
        assert_eq!(inc_simple("1.2.3", "premajor").as_deref(), Some("2.0.0-0"));
        assert_eq!(inc_simple("1.2.3", "preminor").as_deref(), Some("1.3.0-0"));
        assert_eq!(inc_simple("1.2.3", "prepatch").as_deref(), Some("1.2.4-0"));
        assert_eq!(inc_simple("1.2.3-1", "prepatch").as_deref(), Some("1.2.4-0"));
        assert_eq!(
            inc("1.2.3", "preminor", Some("alpha"), PrereleaseBase::Zero).as_deref(),
            Some("1.3.0-alpha.0")
        );
        assert_eq!(
            inc("1.2.3", "premajor", Some("beta"), PrereleaseBase::One).as_deref(),
            Some("2.0.0-beta.1")
        );
        assert_eq!(
            inc("1.2.3", "prepatch", Some("rc"), PrereleaseBase::Omitted).as_deref(),
            Some("1.2.4-rc")
        );
    }

    #[test]
    fn test_inc_prerelease() {
        assert_eq!(inc_simple("1.2.3", "prerelease").as_deref(), Some("1.2.4-0"));
        assert_eq!(inc_simple("1.2.3-0", "prerelease").as_deref(), Some("1.2.3-1"));
        assert_eq!(inc_simple("1.2.3-alpha.0", "prerelease").as_deref(), Some("1.2.3-alpha.1"));
        assert_eq!(inc_simple("1.2.3-alpha.1.beta", "prerelease").as_deref(), Some("1.2.3-alpha.2.beta"));
        assert_eq!(inc_simple("1.2.3-alpha", "prerelease").as_deref(), Some("1.2.3-alpha.0"));
        assert_eq!(
            inc("1.2.3-alpha.0", "prerelease", Some("alpha"), PrereleaseBase::Zero).as_deref(),
            Some("1.2.3-alpha.1")
        );
        assert_eq!(
            inc("1.2.3-alpha.9", "prerelease", Some("beta"), PrereleaseBase::Zero).as_deref(),
            Some("1.2.3-beta.0")
        );
        assert_eq!(
            inc("1.2.3", "prerelease", Some("dev"), PrereleaseBase::Zero).as_deref(),
            Some("1.2.4-dev.0")
        );
        assert_eq!(
            inc("1.2.3-dev", "prerelease", Some("dev"), PrereleaseBase::Zero).as_deref(),
            Some("1.2.3-dev.0")
        );
        assert_eq!(
            inc("1.2.3-beta", "prerelease", Some("alpha"), PrereleaseBase::Omitted).as_deref(),
            Some("1.2.3-alpha")
        );
    }

    #[test]
    fn test_inc_release() {
        assert_eq!(inc_simple("1.2.3-beta.4", "release").as_deref(), Some("1.2.3"));
        assert_eq!(inc_simple("1.2.3", "release").as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_inc_failures() {
        assert_eq!(inc_simple("not-a-version", "patch"), None);
        assert_eq!(inc_simple("1.2.3", "bogus"), None);
        assert_eq!(inc("1.2.3", "prerelease", Some("a..b"), PrereleaseBase::Zero), None);
        assert_eq!(inc("1.2.3", "prerelease", None, PrereleaseBase::Omitted), None);
        assert_eq!(
            inc("1.2.3-beta", "prerelease", Some("beta"), PrereleaseBase::Omitted),
            None
        );
    }

    #[test]
    fn test_inc_component_overflow() {
        let options = Options::default();
        let huge = Version::new(u64::MAX, 0, 0);
        assert!(matches!(
            huge.inc(ReleaseType::Major, None, PrereleaseBase::Zero, &options),
            Err(SemverError::ComponentTooLarge { component: "major", .. })
        ));
        assert!(matches!(
            Version::new(1, u64::MAX, 0).inc(ReleaseType::PreMinor, None, PrereleaseBase::Zero, &options),
            Err(SemverError::ComponentTooLarge { component: "minor", .. })
        ));
        assert!(matches!(
            Version::new(1, 2, MAX_SAFE_INTEGER).inc(ReleaseType::Patch, None, PrereleaseBase::Zero, &options),
            Err(SemverError::ComponentTooLarge { component: "patch", .. })
        ));
        assert_eq!(
            Version::new(MAX_SAFE_INTEGER - 1, 0, 0)
                .inc(ReleaseType::Major, None, PrereleaseBase::Zero, &options)
                .unwrap()
                .major(),
            MAX_SAFE_INTEGER
        );
        // the release type that does not bump is unaffected
        assert_eq!(
            huge.inc(ReleaseType::Release, None, PrereleaseBase::Zero, &options)
                .unwrap()
                .major(),
            u64::MAX
        );
    }

    #[test]
    fn test_inc_keeps_build_in_raw_only() {
        let options = Options::default();
        let next = Version::parse("1.2.3+exp", &options)
            .unwrap()
            .inc(ReleaseType::Minor, None, PrereleaseBase::Zero, &options)
            .unwrap();
        assert_eq!(next.to_string(), "1.3.0");
        assert_eq!(next.raw(), "1.3.0+exp");
    }
}
