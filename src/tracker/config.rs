//! Configuration for the Jira connection.
use secrecy::SecretString;
use url::Url;

/// Jira REST API version prefix.
pub const JIRA_API_PATH: &str = "rest/api/2/";

/// Jira project and credentials used for every tracker request.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Project key, e.g. "ABC".
    pub project_key: String,
    /// Account email used for basic authentication.
    pub email: String,
    /// API token paired with `email`.
    pub api_key: SecretString,
    /// Base URL of the Jira instance, e.g. "https://company.atlassian.net".
    pub url: Url,
}

impl TrackerConfig {
    /// Base URL for REST API calls, tolerant of a missing trailing slash on
    /// the configured instance URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        let mut base = self.url.clone();

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(JIRA_API_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> TrackerConfig {
        TrackerConfig {
            project_key: "ABC".into(),
            email: "dev@example.com".into(),
            api_key: SecretString::from("key".to_string()),
            url: Url::parse(url).unwrap(),
        }
    }

    #[test]
    fn builds_api_base_url() {
        let expected = "https://company.atlassian.net/rest/api/2/";
        for url in [
            "https://company.atlassian.net",
            "https://company.atlassian.net/",
        ] {
            assert_eq!(config(url).api_base_url().unwrap().as_str(), expected);
        }
    }

    #[test]
    fn keeps_context_path() {
        let base = config("https://example.com/jira").api_base_url().unwrap();
        assert_eq!(base.as_str(), "https://example.com/jira/rest/api/2/");
    }
}
