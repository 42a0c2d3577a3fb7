//! Custom error types for jira-releaser.

use thiserror::Error;

/// Main error type for jira-releaser operations.
#[derive(Error, Debug)]
pub enum ReleaserError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Git errors
    #[error("Git command `{command}` failed: {stderr}")]
    GitCommandFailed { command: String, stderr: String },

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Tracker errors
    #[error("Jira request failed with status {status}: {body}")]
    TrackerRequestFailed { status: u16, body: String },

    // Network/API errors
    #[error("Network request failed: {0}")]
    NetworkError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    // JSON parsing errors
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ReleaserError
pub type Result<T> = std::result::Result<T, ReleaserError>;

impl ReleaserError {
    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create a git command error from the command line and its stderr
    pub fn git_command(
        command: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::GitCommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a tracker error from a non-success response
    pub fn tracker_request(status: u16, body: impl Into<String>) -> Self {
        Self::TrackerRequestFailed {
            status,
            body: body.into(),
        }
    }
}

// Wraps generic I/O errors, e.g. failing to spawn git
impl From<std::io::Error> for ReleaserError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for reqwest errors (network/API)
impl From<reqwest::Error> for ReleaserError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NetworkError(err.to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                401 | 403 => Self::AuthenticationError(err.to_string()),
                429 => Self::RateLimitExceeded,
                _ => Self::NetworkError(err.to_string()),
            }
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// Implement From for reqwest header errors (needs custom message)
impl From<reqwest::header::InvalidHeaderValue> for ReleaserError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::AuthenticationError(format!("Invalid header value: {}", err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ReleaserError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("Bad credentials") =>
            {
                Self::AuthenticationError(source.message.clone())
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = ReleaserError::forge("API call failed");
        assert_eq!(err.to_string(), "Forge operation failed: API call failed");

        let err = ReleaserError::invalid_args("missing project key");
        assert_eq!(err.to_string(), "Invalid arguments: missing project key");

        let err = ReleaserError::git_command("git describe --tags", "no tags");
        assert_eq!(
            err.to_string(),
            "Git command `git describe --tags` failed: no tags"
        );

        let err = ReleaserError::tracker_request(404, "not found");
        assert_eq!(
            err.to_string(),
            "Jira request failed with status 404: not found"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = ReleaserError::forge("API call failed");
        assert!(matches!(err, ReleaserError::ForgeError(_)));

        let err = ReleaserError::tracker_request(500, "");
        assert!(matches!(
            err,
            ReleaserError::TrackerRequestFailed { status: 500, .. }
        ));
    }

    #[test]
    fn test_from_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("{");
        let err: ReleaserError = json_err.unwrap_err().into();
        assert!(matches!(err, ReleaserError::JsonParseError(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "git");
        let err: ReleaserError = io_err.into();
        assert!(matches!(err, ReleaserError::Other(_)));
    }
}
