//! Jira integration: projects, release versions and issue fix versions.

/// Connection settings for the Jira instance.
pub mod config;

/// Jira REST API client.
pub mod jira;

/// Trait abstracting the issue tracker operations used by the pipeline.
pub mod traits;

/// Request and response payloads for the Jira REST API.
pub mod types;
