use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LOOSE_VERSION_PATTERN: &str =
    r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$";

/// Semantic version, canonically rendered as `X.Y.Z[-pre][+build]`.
///
/// Parsing is lenient about the input (`v` prefix, missing minor/patch,
/// leading zeros) but the stored value is always a valid semver version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    /// Create a release version without pre-release or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion(semver::Version::new(major, minor, patch))
    }

    /// Parse a version from a tag name (e.g., "v1.2.3", "1.2", "2.0.0-rc.1")
    ///
    /// Returns `None` if the tag is not a version.
    pub fn parse(tag: &str) -> Option<Self> {
        let clean = tag.trim();
        let clean = clean.strip_prefix('v').unwrap_or(clean);

        if let Ok(version) = semver::Version::parse(clean) {
            return Some(SemanticVersion(version));
        }

        Self::parse_loose(clean)
    }

    fn parse_loose(clean: &str) -> Option<Self> {
        let re = Regex::new(LOOSE_VERSION_PATTERN).ok()?;
        let captures = re.captures(clean)?;

        let number = |idx: usize| -> Option<u64> {
            match captures.get(idx) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        let mut version = semver::Version::new(number(1)?, number(2)?, number(3)?);
        if let Some(pre) = captures.get(4) {
            version.pre = semver::Prerelease::new(pre.as_str()).ok()?;
        }
        if let Some(build) = captures.get(5) {
            version.build = semver::BuildMetadata::new(build.as_str()).ok()?;
        }

        Some(SemanticVersion(version))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn pre_release(&self) -> &str {
        self.0.pre.as_str()
    }

    pub fn build(&self) -> &str {
        self.0.build.as_str()
    }

    /// major + 1, minor and patch reset to 0. `None` if major is `u64::MAX`.
    pub fn inc_major(&self) -> Option<Self> {
        Some(Self::new(self.0.major.checked_add(1)?, 0, 0))
    }

    /// minor + 1, patch reset to 0
    pub fn inc_minor(&self) -> Option<Self> {
        Some(Self::new(self.0.major, self.0.minor.checked_add(1)?, 0))
    }

    /// patch + 1
    pub fn inc_patch(&self) -> Option<Self> {
        Some(Self::new(
            self.0.major,
            self.0.minor,
            self.0.patch.checked_add(1)?,
        ))
    }

    /// Apply an upgrade. Pre-release and build metadata are dropped.
    ///
    /// Returns `None` when the bumped component would overflow.
    pub fn bump(&self, upgrade: UpgradeType) -> Option<Self> {
        match upgrade {
            UpgradeType::Major => self.inc_major(),
            UpgradeType::Minor => self.inc_minor(),
            UpgradeType::Patch => self.inc_patch(),
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SemanticVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SemanticVersion::parse(s).ok_or_else(|| format!("not a semantic version: '{}'", s))
    }
}

/// Upgrade severity decision, ordered `Patch < Minor < Major`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeType {
    #[default]
    Patch,
    Minor,
    Major,
}

impl UpgradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeType::Patch => "patch",
            UpgradeType::Minor => "minor",
            UpgradeType::Major => "major",
        }
    }
}

impl fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
