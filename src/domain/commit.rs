use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::config::ConventionalCommitsConfig;

const HEADER_PATTERN: &str = r"^([A-Za-z]+)(?:\(([^()\r\n]+)\))?(!)?: (\S.*)$";

/// One commit as returned by a history walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit message, possibly multi-line
    pub message: String,
    /// Authoring timestamp with the author's offset
    pub date: DateTime<FixedOffset>,
    /// Author display name
    pub author: String,
    /// Full hex object id
    pub hash: String,
}

impl Commit {
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        date: DateTime<FixedOffset>,
    ) -> Self {
        Commit {
            message: message.into(),
            date,
            author: author.into(),
            hash: hash.into(),
        }
    }

    /// First line of the trimmed message
    pub fn summary(&self) -> &str {
        first_line(self.message.trim())
    }
}

/// Text before the first line break.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits format.
    ///
    /// Supports headers of the form:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// The type must be one of `config.types`. A body line starting with one
    /// of `config.breaking_change_indicators` marks the commit as breaking.
    ///
    /// Returns `None` when the message is not a conventional commit.
    pub fn parse(message: &str, config: &ConventionalCommitsConfig) -> Option<Self> {
        let message = message.trim();
        let mut lines = message.lines();
        let header = lines.next()?;

        let re = Regex::new(HEADER_PATTERN).ok()?;
        let captures = re.captures(header)?;

        let r#type = captures.get(1)?.as_str().to_lowercase();
        if !config.types.iter().any(|t| t.eq_ignore_ascii_case(&r#type)) {
            return None;
        }

        let scope = captures.get(2).map(|m| m.as_str().trim().to_string());
        if scope.as_deref() == Some("") {
            return None;
        }

        let description = captures.get(4)?.as_str().trim_end().to_string();
        let has_exclamation = captures.get(3).is_some();

        let has_breaking_footer = lines.any(|line| {
            config
                .breaking_change_indicators
                .iter()
                .any(|indicator| line.starts_with(indicator.as_str()))
        });

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            is_breaking_change: has_exclamation || has_breaking_footer,
        })
    }
}
