//! CLI argument parsing and client configuration.
use clap::Parser;
use secrecy::SecretString;
use url::Url;

use crate::{
    error::{ReleaserError, Result},
    forge::config::{DEFAULT_GITHUB_API_URL, RemoteConfig},
    git::{CommitFilter, DEFAULT_COMMIT_GREP},
    pipeline::config::{DEFAULT_FALLBACK_COMMIT_DEPTH, PipelineConfig},
    tracker::config::TrackerConfig,
};

/// Marks the Jira issues referenced by pull requests merged since the
/// previous release as fixed in this release.
#[derive(Parser, Debug)]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct Args {
    #[arg(long)]
    /// Jira project key issue references must use (e.g. ABC).
    pub jira_project_key: String,

    #[arg(long)]
    /// GitHub access token.
    pub github_token: String,

    #[arg(long)]
    /// Owner of the GitHub repository.
    pub github_repo_owner: String,

    #[arg(long)]
    /// Name of the GitHub repository.
    pub github_repo_name: String,

    #[arg(long)]
    /// Email of the Jira account.
    pub jira_email: String,

    #[arg(long)]
    /// API token of the Jira account.
    pub jira_api_key: String,

    #[arg(long)]
    /// Base URL of the Jira instance (https://company.atlassian.net).
    pub jira_url: String,

    #[arg(long)]
    /// Release tag (vX.Y.Z). Detected with `git describe --tags` when
    /// omitted.
    pub version: Option<String>,

    #[arg(long, default_value = DEFAULT_GITHUB_API_URL)]
    /// GitHub REST API URL. Set for GitHub Enterprise.
    pub github_api_url: String,

    #[arg(long, default_value = ".")]
    /// Path of the local git checkout.
    pub repo_path: String,

    #[arg(long, default_value_t = DEFAULT_FALLBACK_COMMIT_DEPTH)]
    /// Commits to scan below the release tag when there is no previous
    /// release tag.
    pub fallback_commit_depth: u64,

    #[arg(
        long = "commit-grep",
        default_values_t = DEFAULT_COMMIT_GREP.map(String::from)
    )]
    /// Pattern a commit message must contain to be scanned for pull request
    /// numbers. Repeat for several patterns.
    pub commit_grep: Vec<String>,

    #[arg(long, default_value_t = false)]
    /// Scan commits with any of the --commit-grep patterns instead of all.
    pub commit_grep_any: bool,

    #[arg(long, default_value_t = false)]
    /// Report the Jira changes without making them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// GitHub connection for the configured repository.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        require("--github-repo-owner", &self.github_repo_owner)?;
        require("--github-repo-name", &self.github_repo_name)?;
        require("--github-token", &self.github_token)?;

        Url::parse(&self.github_api_url).map_err(|e| {
            ReleaserError::invalid_args(format!(
                "invalid --github-api-url {}: {e}",
                self.github_api_url
            ))
        })?;

        Ok(RemoteConfig {
            owner: self.github_repo_owner.clone(),
            repo: self.github_repo_name.clone(),
            token: SecretString::from(self.github_token.clone()),
            api_url: self.github_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Jira connection for the configured project.
    pub fn tracker_config(&self) -> Result<TrackerConfig> {
        require("--jira-project-key", &self.jira_project_key)?;
        require("--jira-email", &self.jira_email)?;
        require("--jira-api-key", &self.jira_api_key)?;

        let url = Url::parse(&self.jira_url).map_err(|e| {
            ReleaserError::invalid_args(format!(
                "invalid --jira-url {}: {e}",
                self.jira_url
            ))
        })?;

        Ok(TrackerConfig {
            project_key: self.jira_project_key.clone(),
            email: self.jira_email.clone(),
            api_key: SecretString::from(self.jira_api_key.clone()),
            url,
        })
    }

    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        PipelineConfig::builder()
            .project_key(self.jira_project_key.clone())
            .fallback_commit_depth(self.fallback_commit_depth)
            .dry_run(self.dry_run)
            .build()
    }

    pub fn commit_filter(&self) -> Result<CommitFilter> {
        let patterns = self
            .commit_grep
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect::<Vec<String>>();

        if patterns.is_empty() {
            return Err(ReleaserError::invalid_args(
                "at least one --commit-grep pattern is required",
            ));
        }

        Ok(CommitFilter {
            patterns,
            match_all: !self.commit_grep_any,
        })
    }
}

fn require(flag: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReleaserError::invalid_args(format!(
            "{flag} must not be empty"
        )));
    }
    Ok(())
}
