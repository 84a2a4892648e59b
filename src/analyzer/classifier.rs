use log::debug;

use crate::config::ConventionalCommitsConfig;
use crate::domain::{first_line, Commit, ParsedCommit, UpgradeType};

/// Outcome of classifying a set of commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub upgrade: UpgradeType,
    /// First line of the message that decided `upgrade`, empty if none did
    pub relevant_message: String,
}

/// Reduces commits to the most significant upgrade they imply
pub struct CommitClassifier {
    config: ConventionalCommitsConfig,
}

impl CommitClassifier {
    /// Create a new commit classifier
    pub fn new(config: ConventionalCommitsConfig) -> Self {
        CommitClassifier { config }
    }

    /// Classify commits in the order given.
    ///
    /// Commits whose message is not a conventional commit are ignored. A
    /// breaking change sets `Major` and always takes over the relevant
    /// message, so the last breaking commit is the one reported. A minor type
    /// sets `Minor` and the relevant message unless `Major` was already set.
    /// Every other type leaves the result untouched.
    pub fn classify(&self, commits: &[Commit]) -> Classification {
        let mut upgrade = UpgradeType::Patch;
        let mut relevant = "";

        for commit in commits {
            let message = commit.message.trim();
            let Some(parsed) = ParsedCommit::parse(message, &self.config) else {
                debug!("Ignoring non-conventional commit {}", short_hash(&commit.hash));
                continue;
            };

            if parsed.is_breaking_change {
                upgrade = UpgradeType::Major;
                relevant = message;
            } else if self.is_minor_type(&parsed.r#type) && upgrade != UpgradeType::Major {
                upgrade = UpgradeType::Minor;
                relevant = message;
            }
        }

        Classification {
            upgrade,
            relevant_message: first_line(relevant).to_string(),
        }
    }

    fn is_minor_type(&self, commit_type: &str) -> bool {
        self.config
            .minor_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(commit_type))
    }
}

impl Default for CommitClassifier {
    fn default() -> Self {
        Self::new(ConventionalCommitsConfig::default())
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Classify with the default conventional commit settings.
pub fn classify(commits: &[Commit]) -> Classification {
    CommitClassifier::default().classify(commits)
}
