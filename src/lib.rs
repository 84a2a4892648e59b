pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod diff;
pub mod domain;
pub mod error;
pub mod git;
pub mod orchestration;
pub mod report;
pub mod resolver;

pub use error::{ErrorKind, NextVersionError, Result};
pub use orchestration::{get_next_version_based_on_mr, NextVersionPlanner};
pub use report::{NextVersionReport, Output};
