//! Traits related to remote code hosts
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{error::Result, forge::types::PullRequestInfo};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CodeHost {
    /// `owner/repo` of the configured repository.
    fn repo_path(&self) -> String;

    /// Fetch a single pull request by number.
    async fn get_pull_request(&self, number: u64) -> Result<PullRequestInfo>;
}
