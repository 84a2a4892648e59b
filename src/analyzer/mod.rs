//! Analysis engine for determining the upgrade type from commits

pub mod classifier;

pub use classifier::{classify, Classification, CommitClassifier};
