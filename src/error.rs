use thiserror::Error;

use crate::domain::UpgradeType;

/// Coarse classification of a [`NextVersionError`], independent of the
/// context it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    RepositoryAccess,
    RefResolution,
    Checkout,
    HistoryWalk,
    TagListing,
    NoTagsFound,
    NoDiffBetweenBranches,
    Config,
    VersionOverflow,
}

/// Unified error type for git-nextver operations
#[derive(Error, Debug)]
pub enum NextVersionError {
    #[error("the branches must not be equal: '{branch}'")]
    BranchesMustDiffer { branch: String },

    #[error("error opening repo '{path}': {source}")]
    RepositoryAccess {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("failed to check ref '{branch}': {reason}")]
    RefNotFound { branch: String, reason: String },

    #[error("failed to checkout branch '{branch}': {reason}")]
    Checkout { branch: String, reason: String },

    #[error("failed to get git log from '{branch}': {source}")]
    HistoryUnavailable {
        branch: String,
        #[source]
        source: git2::Error,
    },

    #[error("error getting tags: {0}")]
    TagListing(#[source] git2::Error),

    #[error("no semantic version tags found")]
    NoTagsFound,

    #[error("getting tags: {0}")]
    GettingTags(#[source] Box<NextVersionError>),

    #[error("no diff between branches '{source_branch}' and '{target_branch}'")]
    NoDiffBetweenBranches {
        source_branch: String,
        target_branch: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("cannot apply {upgrade} upgrade to {version}: version number overflows")]
    VersionOverflow {
        version: String,
        upgrade: UpgradeType,
    },
}

/// Convenience type alias for Results in git-nextver
pub type Result<T> = std::result::Result<T, NextVersionError>;

impl NextVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextVersionError::Config(msg.into())
    }

    pub fn ref_not_found(branch: impl Into<String>, reason: impl ToString) -> Self {
        NextVersionError::RefNotFound {
            branch: branch.into(),
            reason: reason.to_string(),
        }
    }

    pub fn checkout(branch: impl Into<String>, reason: impl ToString) -> Self {
        NextVersionError::Checkout {
            branch: branch.into(),
            reason: reason.to_string(),
        }
    }

    /// The taxonomy kind of this error. Wrapped catalog failures report
    /// the kind of their cause.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NextVersionError::BranchesMustDiffer { .. } => ErrorKind::InvalidInput,
            NextVersionError::RepositoryAccess { .. } => ErrorKind::RepositoryAccess,
            NextVersionError::RefNotFound { .. } => ErrorKind::RefResolution,
            NextVersionError::Checkout { .. } => ErrorKind::Checkout,
            NextVersionError::HistoryUnavailable { .. } => ErrorKind::HistoryWalk,
            NextVersionError::TagListing(_) => ErrorKind::TagListing,
            NextVersionError::NoTagsFound => ErrorKind::NoTagsFound,
            NextVersionError::GettingTags(inner) => inner.kind(),
            NextVersionError::NoDiffBetweenBranches { .. } => ErrorKind::NoDiffBetweenBranches,
            NextVersionError::Config(_) => ErrorKind::Config,
            NextVersionError::VersionOverflow { .. } => ErrorKind::VersionOverflow,
        }
    }
}
