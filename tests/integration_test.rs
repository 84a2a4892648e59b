// tests/integration_test.rs
use git2::{Oid, Repository, Signature, Time};
use git_nextver::config::Config;
use git_nextver::domain::UpgradeType;
use git_nextver::git::{CheckoutMode, Git2Repository, HistoryProvider, TagProvider};
use git_nextver::{get_next_version_based_on_mr, ErrorKind, NextVersionPlanner};
use std::cell::Cell;
use std::fs;
use tempfile::TempDir;

/// Temporary repository where commits are written straight to branch refs
struct TestRepo {
    dir: TempDir,
    repo: Repository,
    clock: Cell<i64>,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo {
            dir,
            repo,
            clock: Cell::new(1_700_000_000),
        }
    }

    fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Commit a single-file tree onto `branch`, parented on its current tip
    fn commit(&self, branch: &str, message: &str) -> Oid {
        let time = self.clock.get() + 60;
        self.clock.set(time);
        let sig = Signature::new("Test User", "test@example.com", &Time::new(time, 120))
            .expect("Could not create signature");

        let blob = self
            .repo
            .blob(format!("{}\n{}\n", message, time).as_bytes())
            .expect("Could not write blob");
        let mut builder = self.repo.treebuilder(None).expect("Could not get treebuilder");
        builder
            .insert("README.md", blob, 0o100644)
            .expect("Could not insert blob");
        let tree = self
            .repo
            .find_tree(builder.write().expect("Could not write tree"))
            .expect("Could not find tree");

        let refname = format!("refs/heads/{}", branch);
        let parent = self
            .repo
            .find_reference(&refname)
            .ok()
            .and_then(|r| r.target())
            .map(|oid| self.repo.find_commit(oid).expect("Could not find parent"));
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some(&refname), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    fn branch(&self, name: &str, from: &str) {
        let tip = self
            .repo
            .find_branch(from, git2::BranchType::Local)
            .expect("Could not find source branch")
            .get()
            .peel_to_commit()
            .expect("Could not peel branch");
        self.repo
            .branch(name, &tip, false)
            .expect("Could not create branch");
    }

    fn tag(&self, name: &str, oid: Oid) {
        self.repo
            .tag_lightweight(name, &self.repo.find_object(oid, None).unwrap(), false)
            .expect("Could not create tag");
    }

    fn checkout(&self, branch: &str) {
        let refname = format!("refs/heads/{}", branch);
        let object = self.repo.revparse_single(&refname).unwrap();
        let mut options = git2::build::CheckoutBuilder::new();
        options.force();
        self.repo.checkout_tree(&object, Some(&mut options)).unwrap();
        self.repo.set_head(&refname).unwrap();
    }

    /// Delete the loose object file of `oid` from the object database
    fn remove_object(&self, oid: Oid) {
        let hex = oid.to_string();
        let path = self
            .repo
            .path()
            .join("objects")
            .join(&hex[..2])
            .join(&hex[2..]);
        fs::remove_file(path).expect("Could not remove loose object");
    }

    fn head_branch(&self) -> String {
        self.repo.head().unwrap().shorthand().unwrap().to_string()
    }
}

/// main: init (v1.2.3) <- fix: patch on main
/// feature: branched from init, one feat commit with a body
fn feature_repo() -> TestRepo {
    let test_repo = TestRepo::new();
    let init = test_repo.commit("main", "chore: initial commit");
    test_repo.tag("v1.2.3", init);
    test_repo.tag("v1.2.2-rc.1", init);
    test_repo.tag("latest", init);
    test_repo.branch("feature", "main");
    test_repo.commit("feature", "feat: support Y\n\nDetails about Y");
    test_repo.checkout("main");
    test_repo
}

#[test]
fn test_feature_branch_minor_upgrade() {
    let test_repo = feature_repo();

    let report =
        get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
            .expect("Should compute next version");

    assert_eq!(report.versions, vec!["1.2.3", "1.2.2-rc.1"]);
    assert_eq!(report.latest_version, "1.2.3");
    assert_eq!(report.next_version, "1.3.0");
    assert_eq!(report.upgrade_type, UpgradeType::Minor);
    assert_eq!(report.relevant_commit_msg, "feat: support Y");
}

#[test]
fn test_target_only_commits_are_ignored() {
    let test_repo = feature_repo();
    test_repo.commit("main", "feat!: breaking change only on main");
    test_repo.commit("feature", "fix: small fix");

    let report =
        get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
            .unwrap();

    assert_eq!(report.upgrade_type, UpgradeType::Minor);
    assert_eq!(report.next_version, "1.3.0");
}

#[test]
fn test_breaking_change_footer_major_upgrade() {
    let test_repo = feature_repo();
    test_repo.commit(
        "feature",
        "refactor(api): rename field\n\nBREAKING CHANGE: `id` is now `uid`",
    );

    let report =
        get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
            .unwrap();

    assert_eq!(report.upgrade_type, UpgradeType::Major);
    assert_eq!(report.next_version, "2.0.0");
    assert_eq!(report.relevant_commit_msg, "refactor(api): rename field");
}

#[test]
fn test_same_branch_is_invalid_input() {
    let test_repo = feature_repo();

    let err = get_next_version_based_on_mr(test_repo.path(), "main", "main", &Config::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_identical_branches_have_no_diff() {
    let test_repo = TestRepo::new();
    let init = test_repo.commit("main", "chore: initial commit");
    test_repo.tag("v0.1.0", init);
    test_repo.branch("copy", "main");

    let err = get_next_version_based_on_mr(test_repo.path(), "copy", "main", &Config::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoDiffBetweenBranches);
}

#[test]
fn test_repository_without_version_tags() {
    let test_repo = TestRepo::new();
    let init = test_repo.commit("main", "chore: initial commit");
    test_repo.tag("nightly", init);
    test_repo.branch("feature", "main");
    test_repo.commit("feature", "feat: x");

    let err =
        get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
            .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoTagsFound);
    assert!(err.to_string().starts_with("getting tags: "));
}

#[test]
fn test_not_a_repository() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("file.txt"), "plain directory").unwrap();

    let err = get_next_version_based_on_mr(dir.path(), "feature", "main", &Config::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RepositoryAccess);
    assert!(
        err.to_string().starts_with("getting tags: error opening repo"),
        "unexpected message: {}",
        err
    );
}

#[test]
fn test_unknown_branches() {
    let test_repo = feature_repo();

    let err = get_next_version_based_on_mr(test_repo.path(), "missing", "main", &Config::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Checkout);

    let err =
        get_next_version_based_on_mr(test_repo.path(), "feature", "missing", &Config::default())
            .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RefResolution);
}

#[test]
fn test_history_is_newest_first_with_commit_details() {
    let test_repo = feature_repo();
    let repo = Git2Repository::open(test_repo.path()).unwrap();

    let commits = repo.history_of("main", "feature").unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].message.trim(), "feat: support Y\n\nDetails about Y");
    assert_eq!(commits[1].message.trim(), "chore: initial commit");
    assert_eq!(commits[0].author, "Test User");
    assert_eq!(commits[0].hash.len(), 40);
    assert!(commits[0].date > commits[1].date);
    assert_eq!(commits[0].date.offset().local_minus_utc(), 120 * 60);
}

#[test]
fn test_missing_tip_object_is_history_walk_error() {
    let test_repo = TestRepo::new();
    test_repo.commit("main", "chore: initial commit");
    test_repo.commit("main", "fix: one");
    let tip = test_repo.commit("main", "fix: two");
    test_repo.remove_object(tip);

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let err = repo.history_of("main", "main").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HistoryWalk);
    assert!(err.to_string().contains("'main'"));
}

#[test]
fn test_missing_ancestor_is_never_an_empty_history() {
    let test_repo = TestRepo::new();
    let root = test_repo.commit("main", "chore: initial commit");
    test_repo.commit("main", "fix: one");
    test_repo.commit("main", "fix: two");
    test_repo.remove_object(root);

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    match repo.history_of("main", "main") {
        Err(err) => assert_eq!(err.kind(), ErrorKind::HistoryWalk),
        Ok(commits) => {
            assert!(!commits.is_empty());
            assert_eq!(commits[0].message, "fix: two");
        }
    }
}

#[test]
fn test_broken_target_history_fails_the_computation() {
    let test_repo = feature_repo();
    let tip = test_repo.commit("main", "fix: only on main");
    test_repo.remove_object(tip);

    let err =
        get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
            .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HistoryWalk);
}

#[test]
fn test_annotated_and_lightweight_tags_are_listed() {
    let test_repo = feature_repo();
    let head = test_repo.repo.head().unwrap().peel_to_commit().unwrap();
    let sig = test_repo.repo.signature().unwrap();
    test_repo
        .repo
        .tag("v2.0.0", head.as_object(), &sig, "Release 2.0.0", false)
        .unwrap();

    let repo = Git2Repository::open(test_repo.path()).unwrap();
    let tags = repo.list_tags().unwrap();
    assert!(tags.contains(&"v2.0.0".to_string()));
    assert!(tags.contains(&"v1.2.3".to_string()));

    let report =
        get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
            .unwrap();
    assert_eq!(report.latest_version, "2.0.0");
    assert_eq!(report.next_version, "2.1.0");
}

#[test]
fn test_default_mode_leaves_working_tree_alone() {
    let test_repo = feature_repo();
    test_repo.checkout("feature");
    fs::write(test_repo.path().join("README.md"), "local edit\n").unwrap();

    get_next_version_based_on_mr(test_repo.path(), "feature", "main", &Config::default())
        .unwrap();

    assert_eq!(test_repo.head_branch(), "feature");
    let content = fs::read_to_string(test_repo.path().join("README.md")).unwrap();
    assert_eq!(content, "local edit\n");
}

#[test]
fn test_forced_checkout_ends_on_target_branch() {
    let test_repo = feature_repo();
    test_repo.checkout("feature");

    let repo = Git2Repository::open(test_repo.path())
        .unwrap()
        .with_checkout_mode(CheckoutMode::Force);
    let report = NextVersionPlanner::new(repo, &Config::default())
        .get_next_version_based_on_mr("feature", "main")
        .unwrap();

    assert_eq!(report.next_version, "1.3.0");
    assert_eq!(test_repo.head_branch(), "main");
    let content = fs::read_to_string(test_repo.path().join("README.md")).unwrap();
    assert!(content.starts_with("chore: initial commit"));
}

#[test]
fn test_forced_checkout_via_config() {
    let test_repo = feature_repo();
    test_repo.checkout("feature");

    let config = Config {
        checkout: true,
        ..Config::default()
    };
    get_next_version_based_on_mr(test_repo.path(), "feature", "main", &config).unwrap();

    assert_eq!(test_repo.head_branch(), "main");
}
