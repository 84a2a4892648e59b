use serde::Serialize;

use crate::domain::UpgradeType;

/// Result of a next-version computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextVersionReport {
    /// All known versions, newest first
    pub versions: Vec<String>,
    pub latest_version: String,
    pub next_version: String,
    pub upgrade_type: UpgradeType,
    /// First line of the commit message that decided the upgrade type
    pub relevant_commit_msg: String,
}

/// What the CLI prints: the report, or a lone `error` field
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Report(NextVersionReport),
    Failure { error: String },
}

impl Output {
    pub fn from_result<E: std::fmt::Display>(result: Result<NextVersionReport, E>) -> Self {
        match result {
            Ok(report) => Output::Report(report),
            Err(e) => Output::Failure {
                error: e.to_string(),
            },
        }
    }

    /// Indented JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
