//! Repository access abstraction layer
//!
//! The version engine only needs two things from a repository: the names of
//! its tags and the commit history reachable from a branch. Both are
//! expressed as traits so the engine can run against a real repository
//! ([repository::Git2Repository]) or an in-memory one ([mock::MockRepository]).
//!
//! ```rust
//! # use git_nextver::git::{HistoryProvider, TagProvider};
//! # fn example<R: TagProvider + HistoryProvider>(repo: &R) -> git_nextver::Result<()> {
//! let tags = repo.list_tags()?;
//! let commits = repo.history_of("main", "feature/login")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::{CheckoutMode, Git2Repository};

use crate::domain::Commit;
use crate::error::Result;

/// Source of tag names
pub trait TagProvider {
    /// Get all tag names in the repository.
    ///
    /// Names are short names (`v1.2.3`, not `refs/tags/v1.2.3`). No parsing
    /// or filtering is applied.
    fn list_tags(&self) -> Result<Vec<String>>;
}

/// Source of commit history
pub trait HistoryProvider {
    /// Get the commits reachable from `from_branch`, newest first by
    /// committer time, with `checkout_branch` as the current branch.
    ///
    /// The walk is best-effort: once at least one commit has been read, any
    /// traversal error ends the walk and the commits gathered so far are
    /// returned as a success. An error before the first commit is
    /// `HistoryUnavailable`, never an empty history.
    ///
    /// # Errors
    /// * `Checkout` - `checkout_branch` cannot be made current
    /// * `RefNotFound` - `from_branch` is not a local branch
    /// * `HistoryUnavailable` - the walk cannot start or fails before
    ///   yielding a commit
    fn history_of(&self, checkout_branch: &str, from_branch: &str) -> Result<Vec<Commit>>;
}
