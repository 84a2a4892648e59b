//! Domain logic - pure value types independent of git operations

pub mod commit;
pub mod version;

pub use commit::{first_line, Commit, ParsedCommit};
pub use version::{SemanticVersion, UpgradeType};
