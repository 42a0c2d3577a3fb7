//! Git operations needed to find the commits that belong to a release.
//!
//! All operations shell out to the system `git` binary in the configured
//! working directory. History and tag fetches are best-effort: CI checkouts
//! are commonly shallow, and a clone that is already complete makes
//! `git fetch --unshallow` fail.
use log::*;
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    process::Command,
    sync::LazyLock,
};

#[cfg(test)]
use mockall::automock;

use crate::error::{ReleaserError, Result};

/// Glob passed to `git tag -l` when listing release candidates.
pub const VERSION_TAG_GLOB: &str = "v[0-9]*";

/// Default `--grep` patterns. Squash-merged pull requests carry subjects like
/// `[ABC-12] Add widget (#42)`.
pub const DEFAULT_COMMIT_GREP: [&str; 2] = ["#", "]"];

static CHANGE_REQUEST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(\d+)").expect("change request pattern is valid")
});

/// Selects which commit messages are scanned for pull request numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFilter {
    /// Patterns handed to `git log --grep`.
    pub patterns: Vec<String>,
    /// Require every pattern to match (`--all-match`) instead of any.
    pub match_all: bool,
}

impl Default for CommitFilter {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_COMMIT_GREP
                .iter()
                .map(|p| p.to_string())
                .collect(),
            match_all: true,
        }
    }
}

impl CommitFilter {
    /// Arguments appended to `git log`.
    pub fn log_args(&self) -> Vec<String> {
        let mut args = vec![];

        for pattern in self.patterns.iter() {
            args.push("--grep".to_string());
            args.push(pattern.clone());
        }

        if self.match_all && self.patterns.len() > 1 {
            args.push("--all-match".to_string());
        }

        args
    }
}

/// Version control queries used by the release pipeline.
#[cfg_attr(test, automock)]
pub trait VersionControl {
    /// Convert a shallow clone to full history and fetch all tags. Failures
    /// are logged and ignored.
    fn ensure_full_history(&self);
    /// Most recent tag reachable from HEAD, as reported by `git describe`.
    fn describe_tags(&self) -> Result<String>;
    /// Release tags, most recent version first, without pre-release tags.
    fn list_version_tags(&self) -> Result<Vec<String>>;
    /// The release tag preceding `version`, if any.
    fn find_previous_version_tag(
        &self,
        version: &str,
    ) -> Result<Option<String>>;
    /// Pull request numbers referenced by commits between two refs, in log
    /// order. Duplicates are kept.
    fn list_merged_change_request_ids(
        &self,
        from_ref: &str,
        to_ref: &str,
    ) -> Result<Vec<u64>>;
}

/// [`VersionControl`] backed by the system `git` binary.
pub struct SystemGit {
    repo_path: PathBuf,
    commit_filter: CommitFilter,
}

impl SystemGit {
    pub fn new(
        repo_path: impl Into<PathBuf>,
        commit_filter: CommitFilter,
    ) -> Self {
        Self {
            repo_path: repo_path.into(),
            commit_filter,
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo_path);
        cmd
    }

    /// Run git and return stdout, failing on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));

        debug!("running: {command}");

        let output = self.git_cmd().args(args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaserError::git_command(command, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn fetch_best_effort(&self, args: &[&str]) {
        info!("git {}", args.join(" "));

        match self.run(args) {
            Ok(output) if !output.trim().is_empty() => {
                debug!("{}", output.trim())
            }
            Ok(_) => {}
            Err(err) => warn!("{err}: continuing"),
        }
    }
}

impl VersionControl for SystemGit {
    fn ensure_full_history(&self) {
        self.fetch_best_effort(&["fetch", "--unshallow"]);
        self.fetch_best_effort(&["fetch", "--tags"]);
    }

    fn describe_tags(&self) -> Result<String> {
        let output = self.run(&["describe", "--tags"])?;
        Ok(output.trim().to_string())
    }

    fn list_version_tags(&self) -> Result<Vec<String>> {
        let output =
            self.run(&["tag", "--sort", "-v:refname", "-l", VERSION_TAG_GLOB])?;
        Ok(filter_version_tags(&output))
    }

    fn find_previous_version_tag(
        &self,
        version: &str,
    ) -> Result<Option<String>> {
        let tags = self.list_version_tags()?;

        if !tags.iter().any(|t| t == version) {
            warn!("{version} not found in current list of tags");
            return Ok(None);
        }

        Ok(previous_tag_in(&tags, version))
    }

    fn list_merged_change_request_ids(
        &self,
        from_ref: &str,
        to_ref: &str,
    ) -> Result<Vec<u64>> {
        info!("listing all merged PRs between {from_ref} and {to_ref}");

        let range = format!("{from_ref}...{to_ref}");
        let filter_args = self.commit_filter.log_args();

        debug!(
            "scanning commits in {range} matching {:?}",
            self.commit_filter.patterns
        );

        let mut args = vec!["log", range.as_str()];
        args.extend(filter_args.iter().map(String::as_str));

        let output = self.run(&args)?;

        Ok(extract_change_request_ids(&output))
    }
}

/// Split `git tag` output into tag names, dropping pre-release tags such as
/// `v1.0.0-beta`.
pub fn filter_version_tags(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.contains('-'))
        .map(String::from)
        .collect()
}

/// The tag after `version` in a most-recent-first list.
pub fn previous_tag_in(tags: &[String], version: &str) -> Option<String> {
    let index = tags.iter().position(|t| t == version)?;
    tags.get(index + 1).cloned()
}

/// Numbers of every `#<digits>` token, in order of appearance.
pub fn extract_change_request_ids(log: &str) -> Vec<u64> {
    CHANGE_REQUEST_ID
        .captures_iter(log)
        .filter_map(|c| c[1].parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn finds_previous_tag() {
        let list = tags(&["v2.0.0", "v1.5.0", "v1.0.0"]);
        assert_eq!(previous_tag_in(&list, "v1.5.0"), Some("v1.0.0".into()));
        assert_eq!(previous_tag_in(&list, "v2.0.0"), Some("v1.5.0".into()));
    }

    #[test]
    fn previous_tag_missing_when_target_absent_or_oldest() {
        let list = tags(&["v2.0.0", "v1.5.0", "v1.0.0"]);
        assert_eq!(previous_tag_in(&list, "v3.0.0"), None);
        assert_eq!(previous_tag_in(&list, "v1.0.0"), None);
        assert_eq!(previous_tag_in(&[], "v1.0.0"), None);
    }

    #[test]
    fn filters_pre_release_tags() {
        let output = "v2.0.0\nv1.1.0-rc.1\nv1.0.0\nv1.0.0-beta\n\n";
        assert_eq!(filter_version_tags(output), tags(&["v2.0.0", "v1.0.0"]));
    }

    #[test]
    fn extracts_change_request_ids_in_log_order() {
        let log = r#"commit 3333
Author: Someone <someone@example.com>

    [ABC-3] Fix crash (#12)

commit 2222

    [ABC-2] Revert [ABC-1] (#11), reverts #10

commit 1111

    [ABC-1] Add widget (#10)
"#;
        assert_eq!(extract_change_request_ids(log), vec![12, 11, 10, 10]);
    }

    #[test]
    fn ignores_hash_without_digits() {
        assert!(extract_change_request_ids("# heading\n#abc").is_empty());
    }

    #[test]
    fn default_filter_requires_all_patterns() {
        let filter = CommitFilter::default();
        assert_eq!(
            filter.log_args(),
            vec!["--grep", "#", "--grep", "]", "--all-match"]
        );
    }

    #[test]
    fn single_pattern_filter_skips_all_match() {
        let filter = CommitFilter {
            patterns: vec!["Merge pull request".into()],
            match_all: true,
        };
        assert_eq!(filter.log_args(), vec!["--grep", "Merge pull request"]);
    }

    struct TestRepo {
        dir: TempDir,
    }

    impl TestRepo {
        fn new() -> Self {
            let repo = Self {
                dir: TempDir::new().unwrap(),
            };
            repo.git(&["init", "-q"]);
            repo
        }

        fn git(&self, args: &[&str]) {
            let status = Command::new("git")
                .arg("-C")
                .arg(self.dir.path())
                .args([
                    "-c",
                    "user.name=Test",
                    "-c",
                    "user.email=test@example.com",
                    "-c",
                    "commit.gpgsign=false",
                    "-c",
                    "tag.gpgsign=false",
                ])
                .args(args)
                .status()
                .unwrap();
            assert!(status.success(), "git {args:?} failed");
        }

        fn commit(&self, message: &str) {
            self.git(&["commit", "-q", "--allow-empty", "-m", message]);
        }

        fn tag(&self, name: &str) {
            self.git(&["tag", name]);
        }

        fn system_git(&self) -> SystemGit {
            SystemGit::new(self.dir.path(), CommitFilter::default())
        }
    }

    fn seeded_repo() -> TestRepo {
        let repo = TestRepo::new();
        repo.commit("initial commit");
        repo.tag("v1.0.0");
        repo.commit("[ABC-1] Add widget (#10)");
        repo.commit("chore: bump deps");
        repo.commit("docs: mention #99 without brackets");
        repo.tag("v1.1.0-beta");
        repo.commit("[ABC-2] Fix widget (#11)");
        repo.tag("v1.1.0");
        repo
    }

    #[test]
    fn lists_release_tags_from_repository() {
        let repo = seeded_repo();
        let git = repo.system_git();
        assert_eq!(
            git.list_version_tags().unwrap(),
            tags(&["v1.1.0", "v1.0.0"])
        );
    }

    #[test]
    fn finds_previous_release_in_repository() {
        let repo = seeded_repo();
        let git = repo.system_git();
        assert_eq!(
            git.find_previous_version_tag("v1.1.0").unwrap(),
            Some("v1.0.0".into())
        );
        assert_eq!(git.find_previous_version_tag("v1.0.0").unwrap(), None);
        assert_eq!(git.find_previous_version_tag("v9.9.9").unwrap(), None);
    }

    #[test]
    fn describes_current_tag() {
        let repo = seeded_repo();
        assert_eq!(repo.system_git().describe_tags().unwrap(), "v1.1.0");
    }

    #[test]
    fn lists_merged_change_requests_between_tags() {
        let repo = seeded_repo();
        let ids = repo
            .system_git()
            .list_merged_change_request_ids("v1.0.0", "v1.1.0")
            .unwrap();
        assert_eq!(ids, vec![11, 10]);
    }

    #[test]
    fn unknown_ref_is_an_error() {
        let repo = seeded_repo();
        let result = repo
            .system_git()
            .list_merged_change_request_ids("v0.0.1", "v1.1.0");
        assert!(matches!(
            result,
            Err(ReleaserError::GitCommandFailed { .. })
        ));
    }

    #[test_log::test]
    fn fallback_ref_beyond_history_names_the_range() {
        let repo = seeded_repo();
        let result = repo
            .system_git()
            .list_merged_change_request_ids("v1.1.0~100", "v1.1.0");

        match result {
            Err(ReleaserError::GitCommandFailed { command, .. }) => {
                assert!(command.contains("v1.1.0~100...v1.1.0"), "{command}");
            }
            other => panic!("expected git failure, got {other:?}"),
        }
    }

    #[test]
    fn fetch_failures_are_not_fatal() {
        // no remote configured: both fetches fail
        let repo = seeded_repo();
        repo.system_git().ensure_full_history();
    }
}
