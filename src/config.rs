use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NextVersionError, Result};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "GIT_NEXTVER_CONFIG";

const LOCAL_CONFIG_FILE: &str = "./nextver.toml";
const USER_CONFIG_FILE: &str = ".nextver.toml";

/// Represents the complete configuration for git-nextver.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Branch compared against when no target branch is given.
    #[serde(default = "default_target_branch")]
    pub target_branch: String,

    /// Force a working-tree checkout before each history walk.
    #[serde(default)]
    pub checkout: bool,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,
}

fn default_target_branch() -> String {
    "main".to_string()
}

/// Returns the default list of conventional commit types.
fn default_commit_types() -> Vec<String> {
    vec![
        "build".to_string(),
        "chore".to_string(),
        "ci".to_string(),
        "docs".to_string(),
        "feat".to_string(),
        "fix".to_string(),
        "perf".to_string(),
        "refactor".to_string(),
        "revert".to_string(),
        "style".to_string(),
        "test".to_string(),
    ]
}

fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Configuration for conventional commit analysis.
///
/// `types` decides which headers parse at all, `minor_types` which of those
/// raise the upgrade to minor, and `breaking_change_indicators` which body
/// footers mark a commit as breaking.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            types: default_commit_types(),
            minor_types: default_minor_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_branch: default_target_branch(),
            checkout: false,
            conventional_commits: ConventionalCommitsConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path in the `GIT_NEXTVER_CONFIG` environment variable
/// 3. `nextver.toml` in current directory
/// 4. `.nextver.toml` in user config directory
/// 5. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    match locate_config(config_path) {
        Some(path) => {
            log::debug!("Loading configuration from {}", path.display());
            parse_config_file(&path)
        }
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn locate_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    if Path::new(LOCAL_CONFIG_FILE).exists() {
        return Some(PathBuf::from(LOCAL_CONFIG_FILE));
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

fn parse_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        NextVersionError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;

    toml::from_str(&content).map_err(|e| {
        NextVersionError::config(format!("cannot parse '{}': {}", path.display(), e))
    })
}
