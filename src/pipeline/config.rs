use chrono::{Local, NaiveDate};
use derive_builder::Builder;

use crate::error::{ReleaserError, Result};

/// Commits scanned below the release tag when no earlier release tag exists.
pub const DEFAULT_FALLBACK_COMMIT_DEPTH: u64 = 100;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct PipelineConfigParams {
    pub project_key: String,
    #[builder(default = "DEFAULT_FALLBACK_COMMIT_DEPTH")]
    pub fallback_commit_depth: u64,
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default = "Local::now().date_naive()")]
    pub release_date: NaiveDate,
}

impl PipelineConfigParamsBuilder {
    pub fn build(&self) -> Result<PipelineConfig> {
        let params = self._build().map_err(|e| {
            ReleaserError::invalid_args(format!(
                "Failed to build pipeline config: {}",
                e
            ))
        })?;
        PipelineConfig::new(params)
    }
}

/// Settings for a single pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Jira project key issue references must carry.
    pub project_key: String,
    /// Depth of the `<version>~N` fallback lower bound.
    pub fallback_commit_depth: u64,
    /// Report tracker changes without making them.
    pub dry_run: bool,
    /// Release date recorded on the Jira version.
    pub release_date: NaiveDate,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigParamsBuilder {
        PipelineConfigParamsBuilder::default()
    }

    fn new(params: PipelineConfigParams) -> Result<Self> {
        let project_key = params.project_key.trim().to_string();

        if project_key.is_empty() {
            return Err(ReleaserError::invalid_args(
                "jira project key must not be empty",
            ));
        }

        if params.fallback_commit_depth == 0 {
            return Err(ReleaserError::invalid_args(
                "fallback commit depth must be greater than zero",
            ));
        }

        Ok(Self {
            project_key,
            fallback_commit_depth: params.fallback_commit_depth,
            dry_run: params.dry_run,
            release_date: params.release_date,
        })
    }
}
