use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};

use crate::error::{BumpError, Result};

/// Represents the type of semantic version bump to apply.
///
/// Used to determine how to increment version numbers based on commit analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
    Prerelease,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
            VersionBump::Prerelease => "prerelease",
        };
        f.write_str(name)
    }
}

impl FromStr for VersionBump {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            "prerelease" => Ok(VersionBump::Prerelease),
            other => Err(BumpError::config(format!(
                "Unknown bump type '{}' - expected major, minor, patch or prerelease",
                other
            ))),
        }
    }
}

/// Parses a `versionName` into a semantic version.
///
/// Surrounding whitespace and any leading `=`, `v` or `V` characters are removed
/// before strict parsing, so `" v1.2.3 "` and `"=1.2.3"` both yield `1.2.3`.
///
/// # Returns
/// * `Ok(Version)` - Successfully parsed version
/// * `Err` - If the remainder is not a valid semantic version
pub fn clean_version(raw: &str) -> Result<Version> {
    let cleaned = raw
        .trim()
        .trim_start_matches(|c: char| c == '=' || c == 'v' || c == 'V');

    Version::parse(cleaned)
        .map_err(|e| BumpError::version(format!("Invalid version '{}': {}", raw, e)))
}

/// Bumps a version according to the specified bump type.
///
/// A version that already carries a pre-release is promoted rather than
/// incremented when the bump lands on it:
/// - **Major**: `1.0.0-rc.1` becomes `1.0.0`, otherwise major += 1, minor = patch = 0
/// - **Minor**: `1.2.0-rc.1` becomes `1.2.0`, otherwise minor += 1, patch = 0
/// - **Patch**: `1.2.3-rc.1` becomes `1.2.3`, otherwise patch += 1
/// - **Prerelease**: `1.2.3` becomes `1.2.4-0`, `1.2.4-rc.1` becomes `1.2.4-rc.2`
///
/// With `preid`, a new pre-release series starts at `<preid>.0` unless the
/// current one already uses that id.
///
/// Build metadata is always dropped.
///
/// # Example
/// ```
/// use gradle_version_bump::version::{bump_version, VersionBump};
/// use semver::Version;
///
/// let v = Version::new(1, 2, 3);
/// assert_eq!(bump_version(&v, VersionBump::Minor, None).unwrap().to_string(), "1.3.0");
/// assert_eq!(
///     bump_version(&v, VersionBump::Prerelease, Some("beta")).unwrap().to_string(),
///     "1.2.4-beta.0"
/// );
/// ```
pub fn bump_version(version: &Version, bump_type: VersionBump, preid: Option<&str>) -> Result<Version> {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;
    let has_pre = !version.pre.is_empty();

    match bump_type {
        VersionBump::Major => {
            if version.minor != 0 || version.patch != 0 || !has_pre {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Minor => {
            if version.patch != 0 || !has_pre {
                next.minor += 1;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Patch => {
            if !has_pre {
                next.patch += 1;
            }
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Prerelease => {
            if !has_pre {
                next.patch += 1;
            }
            next.pre = next_prerelease(&version.pre, preid)?;
        }
    }

    Ok(next)
}

fn next_prerelease(current: &Prerelease, preid: Option<&str>) -> Result<Prerelease> {
    let mut identifiers: Vec<String> = if current.is_empty() {
        Vec::new()
    } else {
        current.as_str().split('.').map(str::to_string).collect()
    };

    // Increment the last numeric identifier, or start a counter.
    match identifiers
        .iter()
        .rposition(|id| id.parse::<u64>().is_ok())
    {
        Some(index) => {
            let counter = identifiers[index]
                .parse::<u64>()
                .map_err(|e| BumpError::version(e.to_string()))?;
            identifiers[index] = (counter + 1).to_string();
        }
        None => identifiers.push("0".to_string()),
    }

    if let Some(preid) = preid {
        let continues_series = identifiers.first().map(String::as_str) == Some(preid)
            && identifiers
                .get(1)
                .is_some_and(|id| id.parse::<u64>().is_ok());
        if !continues_series {
            identifiers = vec![preid.to_string(), "0".to_string()];
        }
    }

    let joined = identifiers.join(".");
    Prerelease::new(&joined)
        .map_err(|e| BumpError::version(format!("Invalid pre-release '{}': {}", joined, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bump(raw: &str, kind: VersionBump) -> String {
        bump_version(&clean_version(raw).unwrap(), kind, None)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_clean_version_strips_prefixes() {
        assert_eq!(clean_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(clean_version("  =V1.2.3 ").unwrap(), Version::new(1, 2, 3));
        assert_eq!(clean_version("1.2.3-rc.1").unwrap().pre.as_str(), "rc.1");
    }

    #[test]
    fn test_clean_version_invalid() {
        assert!(clean_version("1.2").is_err());
        assert!(clean_version("").is_err());
        assert!(clean_version("version one").is_err());
    }

    #[test]
    fn test_version_bump_major() {
        assert_eq!(bump("1.2.3", VersionBump::Major), "2.0.0");
        assert_eq!(bump("1.0.0-rc.1", VersionBump::Major), "1.0.0");
        assert_eq!(bump("1.2.0-rc.1", VersionBump::Major), "2.0.0");
    }

    #[test]
    fn test_version_bump_minor() {
        assert_eq!(bump("1.2.3", VersionBump::Minor), "1.3.0");
        assert_eq!(bump("1.3.0-rc.1", VersionBump::Minor), "1.3.0");
        assert_eq!(bump("1.3.1-rc.1", VersionBump::Minor), "1.4.0");
    }

    #[test]
    fn test_version_bump_patch() {
        assert_eq!(bump("1.2.3", VersionBump::Patch), "1.2.4");
        assert_eq!(bump("1.2.4-0", VersionBump::Patch), "1.2.4");
    }

    #[test]
    fn test_version_bump_prerelease() {
        assert_eq!(bump("1.2.3", VersionBump::Prerelease), "1.2.4-0");
        assert_eq!(bump("1.2.4-0", VersionBump::Prerelease), "1.2.4-1");
        assert_eq!(bump("1.2.4-rc.1", VersionBump::Prerelease), "1.2.4-rc.2");
        assert_eq!(bump("1.2.4-rc", VersionBump::Prerelease), "1.2.4-rc.0");
        assert_eq!(bump("1.2.4-rc.1.beta", VersionBump::Prerelease), "1.2.4-rc.2.beta");
    }

    #[test]
    fn test_version_bump_prerelease_with_preid() {
        let v = Version::new(1, 2, 3);
        let next = bump_version(&v, VersionBump::Prerelease, Some("alpha")).unwrap();
        assert_eq!(next.to_string(), "1.2.4-alpha.0");

        let next = bump_version(&next, VersionBump::Prerelease, Some("alpha")).unwrap();
        assert_eq!(next.to_string(), "1.2.4-alpha.1");

        let next = bump_version(&next, VersionBump::Prerelease, Some("beta")).unwrap();
        assert_eq!(next.to_string(), "1.2.4-beta.0");
    }

    #[test]
    fn test_build_metadata_is_dropped() {
        assert_eq!(bump("1.2.3+build.5", VersionBump::Patch), "1.2.4");
    }

    #[test]
    fn test_bump_type_from_str() {
        assert_eq!("major".parse::<VersionBump>().unwrap(), VersionBump::Major);
        assert_eq!(" Minor ".parse::<VersionBump>().unwrap(), VersionBump::Minor);
        assert_eq!("prerelease".parse::<VersionBump>().unwrap(), VersionBump::Prerelease);
        assert!("huge".parse::<VersionBump>().is_err());
    }

    #[test]
    fn test_bump_type_display() {
        assert_eq!(VersionBump::Prerelease.to_string(), "prerelease");
        assert_eq!(VersionBump::Patch.to_string(), "patch");
    }
}
