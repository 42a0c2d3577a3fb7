//! Traits related to the issue tracker
use async_trait::async_trait;
use chrono::NaiveDate;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    tracker::types::{TrackerProject, VersionOutcome},
    version::ReleaseVersion,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait IssueTracker {
    /// Fetch the configured project. Fails when the project does not exist or
    /// the credentials are rejected.
    async fn load_project(&self) -> Result<TrackerProject>;

    /// Create a released version named after `version`. An existing version
    /// with the same name is reported as [`VersionOutcome::AlreadyExists`].
    async fn ensure_version_exists(
        &self,
        project: &TrackerProject,
        version: &ReleaseVersion,
        release_date: NaiveDate,
    ) -> Result<VersionOutcome>;

    /// Add `version` to the fix versions of `issue`, keeping existing ones.
    async fn attach_version_to_issue(
        &self,
        issue: &str,
        version: &ReleaseVersion,
    ) -> Result<()>;
}
