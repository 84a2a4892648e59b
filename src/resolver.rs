use crate::domain::{SemanticVersion, UpgradeType};
use crate::error::{NextVersionError, Result};

/// Next version after `latest` for the given upgrade.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
///
/// Pre-release and build metadata of `latest` are dropped. Fails with
/// `VersionOverflow` when the bumped component is already `u64::MAX`.
pub fn next_version(latest: &SemanticVersion, upgrade: UpgradeType) -> Result<SemanticVersion> {
    latest
        .bump(upgrade)
        .ok_or_else(|| NextVersionError::VersionOverflow {
            version: latest.to_string(),
            upgrade,
        })
}
