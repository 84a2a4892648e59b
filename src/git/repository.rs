use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::build::CheckoutBuilder;
use git2::{BranchType, Oid, Repository as Git2Repo, Sort};
use log::{debug, warn};
use std::path::Path;

use crate::domain::Commit;
use crate::error::{NextVersionError, Result};
use crate::git::{HistoryProvider, TagProvider};

/// How the checkout branch of a history query is honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutMode {
    /// Verify the branch exists, leave the working tree alone
    #[default]
    Skip,
    /// Force-checkout the branch, discarding uncommitted changes
    Force,
}

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    checkout: CheckoutMode,
}

impl Git2Repository {
    /// Open the repository at `path`.
    ///
    /// The path must be the repository itself; parent directories are not
    /// searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|source| NextVersionError::RepositoryAccess {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Git2Repository {
            repo,
            checkout: CheckoutMode::default(),
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo,
            checkout: CheckoutMode::default(),
        }
    }

    pub fn with_checkout_mode(mut self, mode: CheckoutMode) -> Self {
        self.checkout = mode;
        self
    }

    pub fn checkout_mode(&self) -> CheckoutMode {
        self.checkout
    }

    fn checkout_branch(&self, branch_name: &str) -> Result<()> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| NextVersionError::checkout(branch_name, e))?;

        if self.checkout == CheckoutMode::Skip {
            debug!("Not checking out '{}', reading history only", branch_name);
            return Ok(());
        }

        let reference = branch.into_reference();
        let refname = reference
            .name()
            .ok_or_else(|| NextVersionError::checkout(branch_name, "invalid reference name"))?
            .to_string();
        let target = reference
            .peel(git2::ObjectType::Commit)
            .map_err(|e| NextVersionError::checkout(branch_name, e))?;

        let mut options = CheckoutBuilder::new();
        options.force();

        self.repo
            .checkout_tree(&target, Some(&mut options))
            .map_err(|e| NextVersionError::checkout(branch_name, e))?;
        self.repo
            .set_head(&refname)
            .map_err(|e| NextVersionError::checkout(branch_name, e))?;

        debug!("Checked out '{}' (forced)", branch_name);
        Ok(())
    }

    fn branch_head_oid(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| NextVersionError::ref_not_found(branch_name, e))?;

        branch
            .get()
            .resolve()
            .map_err(|e| NextVersionError::ref_not_found(branch_name, e))?
            .target()
            .ok_or_else(|| NextVersionError::ref_not_found(branch_name, "branch has no target"))
    }

    fn to_commit(commit: &git2::Commit<'_>) -> Commit {
        let author = commit.author();
        let when = author.when();

        let offset = FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or(Utc.fix());
        let date: DateTime<FixedOffset> = DateTime::from_timestamp(when.seconds(), 0)
            .unwrap_or_default()
            .with_timezone(&offset);

        Commit {
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            date,
            author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            hash: commit.id().to_string(),
        }
    }
}

impl TagProvider for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self
            .repo
            .tag_names(None)
            .map_err(NextVersionError::TagListing)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }
}

impl HistoryProvider for Git2Repository {
    fn history_of(&self, checkout_branch: &str, from_branch: &str) -> Result<Vec<Commit>> {
        self.checkout_branch(checkout_branch)?;

        let head = self.branch_head_oid(from_branch)?;

        let walk_error = |source: git2::Error| NextVersionError::HistoryUnavailable {
            branch: from_branch.to_string(),
            source,
        };
        let mut revwalk = self.repo.revwalk().map_err(walk_error)?;
        revwalk.set_sorting(Sort::TIME).map_err(walk_error)?;
        revwalk.push(head).map_err(walk_error)?;

        let steps = revwalk.map(|step| {
            step.and_then(|oid| self.repo.find_commit(oid))
                .map(|commit| Self::to_commit(&commit))
        });
        let commits = collect_history(from_branch, steps)?;

        debug!(
            "Read {} commits from '{}' (current branch '{}')",
            commits.len(),
            from_branch,
            checkout_branch
        );
        Ok(commits)
    }
}

/// Gather walk results until the first error.
///
/// An error before any commit was read means the walk never began and is
/// returned as `HistoryUnavailable`. A later error ends the walk with the
/// commits gathered so far.
fn collect_history<I>(from_branch: &str, steps: I) -> Result<Vec<Commit>>
where
    I: IntoIterator<Item = std::result::Result<Commit, git2::Error>>,
{
    let mut commits = Vec::new();

    for step in steps {
        match step {
            Ok(commit) => commits.push(commit),
            Err(source) if commits.is_empty() => {
                return Err(NextVersionError::HistoryUnavailable {
                    branch: from_branch.to_string(),
                    source,
                });
            }
            Err(e) => {
                warn!(
                    "History walk from '{}' stopped early after {} commits: {}",
                    from_branch,
                    commits.len(),
                    e
                );
                break;
            }
        }
    }

    Ok(commits)
}
