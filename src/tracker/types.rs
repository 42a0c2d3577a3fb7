use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::version::ReleaseVersion;

/// Error Jira reports in `errors.name` when the version already exists.
pub const VERSION_EXISTS_MESSAGE: &str =
    "A version with this name already exists in this project.";

/// The Jira project releases are recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerProject {
    /// Internal project id, required when creating versions.
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// Result of asking the tracker for a release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersion {
    pub archived: bool,
    pub release_date: String,
    pub name: String,
    pub project_id: String,
    pub released: bool,
}

impl CreateVersion {
    pub fn new(
        project: &TrackerProject,
        version: &ReleaseVersion,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            archived: false,
            release_date: release_date.format("%Y-%m-%d").to_string(),
            name: version.to_string(),
            project_id: project.id.clone(),
            released: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionName {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FixVersionChange {
    pub add: VersionName,
}

#[derive(Debug, Serialize)]
pub struct IssueFieldUpdates {
    #[serde(rename = "fixVersions")]
    pub fix_versions: Vec<FixVersionChange>,
}

/// Issue edit payload that appends a fix version.
#[derive(Debug, Serialize)]
pub struct AddFixVersion {
    pub update: IssueFieldUpdates,
}

impl AddFixVersion {
    pub fn new(version: &ReleaseVersion) -> Self {
        Self {
            update: IssueFieldUpdates {
                fix_versions: vec![FixVersionChange {
                    add: VersionName {
                        name: version.to_string(),
                    },
                }],
            },
        }
    }
}

/// Standard Jira error body.
#[derive(Debug, Default, Deserialize)]
pub struct JiraErrorResponse {
    #[serde(default, rename = "errorMessages")]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: HashMap<String, String>,
}

/// Recognize the "version already exists" response to a version create.
pub fn classify_version_error(body: &str) -> Option<VersionOutcome> {
    let response: JiraErrorResponse = serde_json::from_str(body).ok()?;

    match response.errors.get("name") {
        Some(message) if message == VERSION_EXISTS_MESSAGE => {
            Some(VersionOutcome::AlreadyExists)
        }
        _ => None,
    }
}
