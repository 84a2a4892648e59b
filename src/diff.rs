use std::collections::HashSet;

use crate::domain::Commit;

/// Commits of `newer` whose hash does not appear in `base`, in `newer`'s order.
///
/// Only the hash is compared. An empty result is not an error here.
pub fn diff_commits(base: &[Commit], newer: &[Commit]) -> Vec<Commit> {
    let known: HashSet<&str> = base.iter().map(|c| c.hash.as_str()).collect();

    newer
        .iter()
        .filter(|c| !known.contains(c.hash.as_str()))
        .cloned()
        .collect()
}
