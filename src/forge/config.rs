//! Configuration for GitHub connections.
use secrecy::SecretString;

/// Public GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Remote repository connection configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token, sent as the basic auth username.
    pub token: SecretString,
    /// REST API base URL. Override for GitHub Enterprise.
    pub api_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            owner: "".to_string(),
            repo: "".to_string(),
            token: SecretString::from("".to_string()),
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }
}

impl RemoteConfig {
    /// `owner/repo`, as used in log output.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
