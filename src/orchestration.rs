//! Next-version workflow
//!
//! Wires catalog, history, diff, classification and resolution into the
//! single `get_next_version_based_on_mr` operation.

use log::{debug, info};
use std::path::Path;

use crate::analyzer::CommitClassifier;
use crate::catalog::VersionCatalog;
use crate::config::Config;
use crate::diff::diff_commits;
use crate::error::{NextVersionError, Result};
use crate::git::{CheckoutMode, Git2Repository, HistoryProvider, TagProvider};
use crate::report::NextVersionReport;
use crate::resolver::next_version;

/// Computes the next version for merging a source branch into a target branch
pub struct NextVersionPlanner<R> {
    repo: R,
    classifier: CommitClassifier,
}

impl<R: TagProvider + HistoryProvider> NextVersionPlanner<R> {
    pub fn new(repo: R, config: &Config) -> Self {
        NextVersionPlanner {
            repo,
            classifier: CommitClassifier::new(config.conventional_commits.clone()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Run the workflow:
    /// 1. Reject identical branches
    /// 2. Load the version catalog
    /// 3. Read history from the target and from the source branch
    /// 4. Keep the commits only the source branch has
    /// 5. Classify them and bump the latest version accordingly
    ///
    /// The first failure is returned as is; no partial report is produced.
    pub fn get_next_version_based_on_mr(
        &self,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<NextVersionReport> {
        ensure_distinct(source_branch, target_branch)?;

        let catalog = VersionCatalog::load(&self.repo)
            .map_err(|e| NextVersionError::GettingTags(Box::new(e)))?;

        let target_commits = self.repo.history_of(source_branch, target_branch)?;
        let source_commits = self.repo.history_of(target_branch, source_branch)?;

        let diff = diff_commits(&target_commits, &source_commits);
        debug!(
            "{} commits on '{}' are not on '{}'",
            diff.len(),
            source_branch,
            target_branch
        );

        let Some(first) = diff.first() else {
            return Err(NextVersionError::NoDiffBetweenBranches {
                source_branch: source_branch.to_string(),
                target_branch: target_branch.to_string(),
            });
        };

        let classification = self.classifier.classify(&diff);
        let relevant_commit_msg = if classification.relevant_message.is_empty() {
            first.summary().to_string()
        } else {
            classification.relevant_message
        };

        let latest = catalog.latest();
        let next = next_version(latest, classification.upgrade)?;

        info!(
            "{} upgrade: {} -> {} ({})",
            classification.upgrade, latest, next, relevant_commit_msg
        );

        Ok(NextVersionReport {
            versions: catalog.version_strings(),
            latest_version: latest.to_string(),
            next_version: next.to_string(),
            upgrade_type: classification.upgrade,
            relevant_commit_msg,
        })
    }
}

fn ensure_distinct(source_branch: &str, target_branch: &str) -> Result<()> {
    if source_branch == target_branch {
        return Err(NextVersionError::BranchesMustDiffer {
            branch: source_branch.to_string(),
        });
    }
    Ok(())
}

/// Open the repository at `path` and compute the next version.
///
/// Identical branches are rejected before the repository is opened. Open
/// failures are reported as part of loading the tags. The working tree is
/// only touched when `config.checkout` is set.
pub fn get_next_version_based_on_mr<P: AsRef<Path>>(
    path: P,
    source_branch: &str,
    target_branch: &str,
    config: &Config,
) -> Result<NextVersionReport> {
    ensure_distinct(source_branch, target_branch)?;

    let mode = if config.checkout {
        CheckoutMode::Force
    } else {
        CheckoutMode::Skip
    };
    let repo = Git2Repository::open(path)
        .map_err(|e| NextVersionError::GettingTags(Box::new(e)))?
        .with_checkout_mode(mode);

    NextVersionPlanner::new(repo, config).get_next_version_based_on_mr(source_branch, target_branch)
}
