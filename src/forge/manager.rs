//! Manager that wraps code host implementations
use log::*;
use regex::Regex;

use crate::{error::Result, forge::traits::CodeHost};

pub struct ForgeManager {
    forge: Box<dyn CodeHost>,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn CodeHost>) -> Self {
        Self { forge }
    }

    pub fn repo_path(&self) -> String {
        self.forge.repo_path()
    }

    /// Issue keys for `project_key` found in the pull request title and head
    /// branch name, title matches first. The same key may appear twice.
    pub async fn get_issue_references(
        &self,
        project_key: &str,
        pr_number: u64,
    ) -> Result<Vec<String>> {
        let pr = self.forge.get_pull_request(pr_number).await?;

        let references = extract_issue_references(
            project_key,
            &[pr.title.as_str(), pr.head_branch.as_str()],
        )?;

        debug!(
            "pull request #{} ({}) references: {:?}",
            pr.number, pr.head_branch, references
        );

        Ok(references)
    }
}

/// Every `<project_key>-<digits>` substring, case-sensitive on the key.
pub fn extract_issue_references(
    project_key: &str,
    texts: &[&str],
) -> Result<Vec<String>> {
    let re = Regex::new(&format!(r"{}-\d+", regex::escape(project_key)))?;

    Ok(texts
        .iter()
        .flat_map(|text| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect())
}
