//! Ordered set of the semantic versions found in a repository's tags

use log::{debug, info};

use crate::domain::SemanticVersion;
use crate::error::{NextVersionError, Result};
use crate::git::TagProvider;

/// All version tags of a repository, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    all: Vec<SemanticVersion>,
}

impl VersionCatalog {
    /// Query the provider for tags and build the catalog from them.
    pub fn load<T: TagProvider + ?Sized>(provider: &T) -> Result<Self> {
        let tags = provider.list_tags()?;
        Self::from_tags(tags)
    }

    /// Build a catalog from raw tag names.
    ///
    /// Tags that are not versions are skipped. Fails with `NoTagsFound` when
    /// none remain. Equal versions keep their input order.
    pub fn from_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all: Vec<SemanticVersion> = tags
            .into_iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                let parsed = SemanticVersion::parse(tag);
                if parsed.is_none() {
                    debug!("Skipping tag '{}': not a semantic version", tag);
                }
                parsed
            })
            .collect();

        if all.is_empty() {
            return Err(NextVersionError::NoTagsFound);
        }

        all.sort_by(|a, b| b.cmp(a));

        info!("Found {} version tags, latest is {}", all.len(), all[0]);
        Ok(VersionCatalog { all })
    }

    /// Greatest version in the catalog
    pub fn latest(&self) -> &SemanticVersion {
        &self.all[0]
    }

    /// Every version, newest first
    pub fn all(&self) -> &[SemanticVersion] {
        &self.all
    }

    /// Every version rendered canonically, newest first
    pub fn version_strings(&self) -> Vec<String> {
        self.all.iter().map(|v| v.to_string()).collect()
    }
}
