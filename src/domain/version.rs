use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// `MAJOR.MINOR.PATCH` with optional `-prerelease` and `+build` suffixes
const SEMVER_PATTERN: &str = r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([a-zA-Z0-9.-]+))?(?:\+([a-zA-Z0-9.-]+))?$";

fn semver_regex() -> Result<&'static Regex> {
    static SEMVER: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    SEMVER
        .get_or_init(|| Regex::new(SEMVER_PATTERN))
        .as_ref()
        .map_err(|e| ReleaseError::InvalidFormat(format!("semver pattern: {}", e)))
}

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
    pub build: Option<String>,
}

impl Version {
    /// Create a new release version without pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
            build: None,
        }
    }

    /// Parse a version string (e.g., "1.2.3-beta.1+build.5")
    pub fn parse(version: &str) -> Result<Self> {
        let captures = semver_regex()?
            .captures(version)
            .ok_or_else(|| ReleaseError::InvalidFormat(version.to_string()))?;

        let component = |index: usize| -> Result<u64> {
            captures[index]
                .parse::<u64>()
                .map_err(|_| ReleaseError::InvalidFormat(version.to_string()))
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            pre: captures.get(4).map(|m| m.as_str().to_string()),
            build: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Bump version according to bump type
    ///
    /// Pre-release and build metadata never survive a bump. A component
    /// already at `u64::MAX` cannot be incremented.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let increment = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                ReleaseError::parse(format!(
                    "cannot bump {} version of {}: component overflows",
                    bump_type, self
                ))
            })
        };

        Ok(match bump_type {
            VersionBump::Major => Version::new(increment(self.major)?, 0, 0),
            VersionBump::Minor => Version::new(self.major, increment(self.minor)?, 0),
            VersionBump::Patch => Version::new(self.major, self.minor, increment(self.patch)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Version bump directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl FromStr for VersionBump {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(ReleaseError::InvalidBumpType(other.to_string())),
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// What the operator asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionTarget {
    Bump(VersionBump),
    Explicit(String),
}

impl VersionTarget {
    /// Classify the positional argument.
    ///
    /// Only the exact words `major`, `minor` and `patch` are bump directives;
    /// anything else is taken as a literal version and validated later.
    pub fn from_arg(arg: &str) -> Self {
        match arg.parse::<VersionBump>() {
            Ok(bump) => VersionTarget::Bump(bump),
            Err(_) => VersionTarget::Explicit(arg.to_string()),
        }
    }
}

/// Check that a literal version is well-formed semver.
pub fn validate_version(version: &str) -> Result<()> {
    if semver_regex()?.is_match(version) {
        Ok(())
    } else {
        Err(ReleaseError::InvalidFormat(version.to_string()))
    }
}

/// Parse the version already recorded in the manifest.
fn parse_current(current: &str) -> Result<Version> {
    Version::parse(current).map_err(|_| {
        ReleaseError::parse(format!("current version '{}' is not valid semver", current))
    })
}

/// Bump a version string by directive name ("major", "minor" or "patch").
pub fn bump_version(current: &str, bump_type: &str) -> Result<String> {
    let bump = bump_type.parse::<VersionBump>()?;
    Ok(parse_current(current)?.bump(bump)?.to_string())
}

/// Compute the version to release from the current one.
pub fn resolve_target(current: &str, target: &VersionTarget) -> Result<String> {
    match target {
        VersionTarget::Bump(bump) => Ok(parse_current(current)?.bump(*bump)?.to_string()),
        VersionTarget::Explicit(literal) => {
            validate_version(literal)?;
            Ok(literal.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_with_metadata() {
        let v = Version::parse("2.1.3-rc.1+001").unwrap();
        assert_eq!(v.major, 2);
        assert_eq!(v.minor, 1);
        assert_eq!(v.patch, 3);
        assert_eq!(v.pre.as_deref(), Some("rc.1"));
        assert_eq!(v.build.as_deref(), Some("001"));
        assert_eq!(v.to_string(), "2.1.3-rc.1+001");
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_version_bump_major() {
        assert_eq!(bump_version("1.2.3", "major").unwrap(), "2.0.0");
    }

    #[test]
    fn test_version_bump_minor() {
        assert_eq!(bump_version("1.2.3", "minor").unwrap(), "1.3.0");
    }

    #[test]
    fn test_version_bump_patch() {
        assert_eq!(bump_version("1.2.3", "patch").unwrap(), "1.2.4");
    }

    #[test]
    fn test_bump_drops_prerelease() {
        assert_eq!(bump_version("1.2.3-beta", "patch").unwrap(), "1.2.4");
        assert_eq!(bump_version("1.2.3-beta+exp.sha", "minor").unwrap(), "1.3.0");
        assert_eq!(bump_version("0.9.9+build.7", "major").unwrap(), "1.0.0");
    }

    #[test]
    fn test_bump_touches_only_expected_components() {
        for (major, minor, patch) in [(0, 0, 0), (1, 2, 3), (10, 0, 99), (3, 14, 159)] {
            let v = Version::new(major, minor, patch);
            assert_eq!(v.bump(VersionBump::Patch).unwrap(), Version::new(major, minor, patch + 1));
            assert_eq!(v.bump(VersionBump::Minor).unwrap(), Version::new(major, minor + 1, 0));
            assert_eq!(v.bump(VersionBump::Major).unwrap(), Version::new(major + 1, 0, 0));
        }
    }

    #[test]
    fn test_invalid_bump_type() {
        let err = bump_version("1.2.3", "huge").unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidBumpType(ref t) if t == "huge"));
        assert!("Patch".parse::<VersionBump>().is_err());
    }

    #[test]
    fn test_validate_accepts_semver() {
        for v in ["1.0.0", "1.0.0-beta.1", "1.0.0+build.5", "2.1.3-rc.1+001"] {
            assert!(validate_version(v).is_ok(), "{} should be valid", v);
        }
    }

    #[test]
    fn test_validate_rejects_malformed() {
        for v in [
            "1.0",
            "v1.0.0",
            "1.0.0.0",
            "",
            "1.0.0-",
            "1.0.0-beta_1",
            "\u{0661}.\u{0660}.\u{0660}",
            "１.０.０",
            "1.0.\u{0663}",
        ] {
            let err = validate_version(v).unwrap_err();
            assert!(
                matches!(err, ReleaseError::InvalidFormat(ref s) if s == v),
                "{} should be rejected",
                v
            );
        }
    }

    #[test]
    fn test_non_ascii_digits_never_reach_the_manifest() {
        let target = VersionTarget::from_arg("\u{0661}.\u{0660}.\u{0660}");
        assert!(matches!(
            resolve_target("1.0.0", &target),
            Err(ReleaseError::InvalidFormat(_))
        ));
        assert!(Version::parse("１.２.３").is_err());
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let max = u64::MAX;
        for bump in ["major", "minor", "patch"] {
            let current = match bump {
                "major" => format!("{}.0.0", max),
                "minor" => format!("0.{}.0", max),
                _ => format!("0.0.{}", max),
            };
            let err = bump_version(&current, bump).unwrap_err();
            assert!(
                matches!(err, ReleaseError::Parse(ref msg) if msg.contains(&current)),
                "{} bump of {} should fail",
                bump,
                current
            );
        }
        // Lower components may sit at the limit when a higher one is bumped
        assert_eq!(
            bump_version(&format!("1.{}.{}", max, max), "major").unwrap(),
            "2.0.0"
        );
    }

    #[test]
    fn test_target_from_arg() {
        assert_eq!(
            VersionTarget::from_arg("minor"),
            VersionTarget::Bump(VersionBump::Minor)
        );
        assert_eq!(
            VersionTarget::from_arg("3.0.0"),
            VersionTarget::Explicit("3.0.0".to_string())
        );
        assert_eq!(
            VersionTarget::from_arg("MAJOR"),
            VersionTarget::Explicit("MAJOR".to_string())
        );
    }

    #[test]
    fn test_resolve_target() {
        let bump = VersionTarget::Bump(VersionBump::Patch);
        assert_eq!(resolve_target("1.0.0", &bump).unwrap(), "1.0.1");

        let literal = VersionTarget::Explicit("4.0.0-rc.1".to_string());
        assert_eq!(resolve_target("1.0.0", &literal).unwrap(), "4.0.0-rc.1");

        let bad = VersionTarget::Explicit("4.0".to_string());
        assert!(matches!(
            resolve_target("1.0.0", &bad),
            Err(ReleaseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_bump_rejects_unparsable_current() {
        let bump = VersionTarget::Bump(VersionBump::Patch);
        assert!(matches!(
            resolve_target("not-a-version", &bump),
            Err(ReleaseError::Parse(_))
        ));
    }
}
