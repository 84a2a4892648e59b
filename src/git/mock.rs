use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::Commit;
use crate::error::{NextVersionError, Result};
use crate::git::{HistoryProvider, TagProvider};

/// Mock repository for testing without actual git operations
///
/// Each branch maps directly to the history a walk from it would return.
/// Calls are recorded so tests can assert on access order.
pub struct MockRepository {
    tags: Vec<String>,
    histories: HashMap<String, Vec<Commit>>,
    calls: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            histories: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a tag name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Set the history returned when walking from `branch`
    pub fn set_history(&mut self, branch: impl Into<String>, commits: Vec<Commit>) {
        self.histories.insert(branch.into(), commits);
    }

    /// Recorded calls, e.g. `["list_tags", "history_of feature main"]`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TagProvider for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        self.record("list_tags".to_string());
        Ok(self.tags.clone())
    }
}

impl HistoryProvider for MockRepository {
    fn history_of(&self, checkout_branch: &str, from_branch: &str) -> Result<Vec<Commit>> {
        self.record(format!("history_of {} {}", checkout_branch, from_branch));

        if !self.histories.contains_key(checkout_branch) {
            return Err(NextVersionError::checkout(
                checkout_branch,
                "branch not found",
            ));
        }

        self.histories
            .get(from_branch)
            .cloned()
            .ok_or_else(|| NextVersionError::ref_not_found(from_branch, "reference not found"))
    }
}
