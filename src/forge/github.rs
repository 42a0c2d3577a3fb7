//! Implements the CodeHost trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;
use secrecy::ExposeSecret;

use crate::{
    error::Result,
    forge::{config::RemoteConfig, traits::CodeHost, types::PullRequestInfo},
};

/// GitHub code host using Octocrab, authenticated with the access token as
/// the basic auth username and an empty password.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create a GitHub client for the configured repository. Must be called
    /// from within a tokio runtime.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let builder = Octocrab::builder()
            .basic_auth(config.token.expose_secret().to_string(), String::new())
            .base_uri(config.api_url.clone())?;
        let instance = builder.build()?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl CodeHost for Github {
    fn repo_path(&self) -> String {
        self.config.path()
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequestInfo> {
        debug!("fetching pull request #{number} from {}", self.config.path());

        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        Ok(PullRequestInfo {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            head_branch: pr.head.ref_field,
        })
    }
}
