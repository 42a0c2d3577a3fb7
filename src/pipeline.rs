//! Release pipeline: from a release tag to Jira fix versions.
//!
//! The pipeline runs strictly in order, each step awaited before the next:
//!
//! 1. Fetch full history and tags (best-effort)
//! 2. Resolve the release tag, stopping quietly when it is not a release
//! 3. Load the Jira project
//! 4. Find the previous release tag, or fall back to `<tag>~N`
//! 5. Collect pull request numbers from the commits in between
//! 6. Collect the Jira issue keys those pull requests reference
//! 7. Ensure the Jira version exists
//! 8. Add the version to each issue's fix versions
//!
//! Any failure past step 2 aborts the run. Fix versions already added are left
//! in place.
use log::*;
use std::collections::BTreeSet;

use crate::{
    error::Result,
    forge::manager::ForgeManager,
    git::VersionControl,
    tracker::{traits::IssueTracker, types::VersionOutcome},
    version::ReleaseVersion,
};

pub mod config;

pub use config::PipelineConfig;


/// Collaborators handed to [`ReleasePipeline::new`].
pub struct PipelineParams {
    pub config: PipelineConfig,
    pub git: Box<dyn VersionControl>,
    pub forge: ForgeManager,
    pub tracker: Box<dyn IssueTracker>,
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub version: ReleaseVersion,
    /// Lower bound of the commit range: the previous tag or `<version>~N`.
    pub previous: String,
    /// Pull request numbers in log order, duplicates included.
    pub change_requests: Vec<u64>,
    pub issues: BTreeSet<String>,
    /// `None` on a dry run.
    pub version_outcome: Option<VersionOutcome>,
}

pub struct ReleasePipeline {
    config: PipelineConfig,
    git: Box<dyn VersionControl>,
    forge: ForgeManager,
    tracker: Box<dyn IssueTracker>,
}

impl ReleasePipeline {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            config: params.config,
            git: params.git,
            forge: params.forge,
            tracker: params.tracker,
        }
    }

    /// Run the pipeline for `requested_version`, or for the tag `git describe`
    /// reports when none is given. Returns `Ok(None)` when that tag is not a
    /// release tag.
    pub async fn run(
        &self,
        requested_version: Option<String>,
    ) -> Result<Option<ReleaseSummary>> {
        self.git.ensure_full_history();

        let Some(version) = self.resolve_version(requested_version)? else {
            return Ok(None);
        };

        info!(
            "releasing {version} to jira project {}",
            self.config.project_key
        );

        let project = self.tracker.load_project().await?;

        let previous = self.lower_bound(&version)?;

        let change_requests = self
            .git
            .list_merged_change_request_ids(&previous, version.as_str())?;

        info!(
            "Merged Pull Requests: {}",
            change_requests
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        );

        let issues = self.collect_issue_references(&change_requests).await?;

        info!(
            "found these Jira IDs for this release: {}",
            issues.iter().cloned().collect::<Vec<String>>().join(", ")
        );

        let version_outcome = if self.config.dry_run {
            info!("dry-run: would get or create version {version}");

            for issue in issues.iter() {
                info!("dry-run: would mark issue {issue} fixed by {version}");
            }

            None
        } else {
            let outcome = self
                .tracker
                .ensure_version_exists(
                    &project,
                    &version,
                    self.config.release_date,
                )
                .await?;

            for issue in issues.iter() {
                self.tracker.attach_version_to_issue(issue, &version).await?;
            }

            Some(outcome)
        };

        Ok(Some(ReleaseSummary {
            version,
            previous,
            change_requests,
            issues,
            version_outcome,
        }))
    }

    fn resolve_version(
        &self,
        requested_version: Option<String>,
    ) -> Result<Option<ReleaseVersion>> {
        let raw = match requested_version.filter(|v| !v.is_empty()) {
            Some(version) => version,
            None => {
                let described = self.git.describe_tags()?;
                debug!("detected version from git: {described}");
                described
            }
        };

        let version = ReleaseVersion::parse(&raw);

        if version.is_none() {
            info!("{raw} is not a release tag: nothing to release");
        }

        Ok(version)
    }

    fn lower_bound(&self, version: &ReleaseVersion) -> Result<String> {
        if let Some(previous) =
            self.git.find_previous_version_tag(version.as_str())?
        {
            info!("previous release: {previous}");
            return Ok(previous);
        }

        let depth = self.config.fallback_commit_depth;

        info!(
            "did not find a version before {version}, \
             fall back to last {depth} commits"
        );

        Ok(version.ancestor(depth))
    }

    async fn collect_issue_references(
        &self,
        change_requests: &[u64],
    ) -> Result<BTreeSet<String>> {
        let mut issues = BTreeSet::new();

        debug!(
            "looking up {} pull request(s) in {}",
            change_requests.len(),
            self.forge.repo_path()
        );

        for pr_number in change_requests.iter() {
            let references = self
                .forge
                .get_issue_references(&self.config.project_key, *pr_number)
                .await?;
            issues.extend(references);
        }

        Ok(issues)
    }
}
