//! GitHub access for the pull requests merged into a release.
//!
//! Pull requests are looked up one at a time by number; the title and head
//! branch name are scanned for Jira issue keys.

/// Configuration and authentication for the GitHub API.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Wrapper adding issue key extraction on top of a code host.
pub mod manager;

/// Common traits for code host abstraction.
pub mod traits;

/// Shared data types for pull requests.
pub mod types;
