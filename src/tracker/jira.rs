//! Implements the IssueTracker trait for Jira
use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use chrono::NaiveDate;
use log::*;
use reqwest::{
    Client, RequestBuilder, Response, Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;

use crate::{
    error::{ReleaserError, Result},
    tracker::{
        config::TrackerConfig,
        traits::IssueTracker,
        types::{
            AddFixVersion, CreateVersion, TrackerProject, VersionOutcome,
            classify_version_error,
        },
    },
    version::ReleaseVersion,
};

/// Jira Cloud / Server client using basic authentication with an account
/// email and API token.
pub struct Jira {
    config: TrackerConfig,
    base_url: Url,
    client: Client,
}

impl Jira {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.append(AUTHORIZATION, basic_auth_header(&config)?);
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));
        headers.append(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = config.api_base_url()?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Send a request, turning non-success responses into
    /// [`ReleaserError::TrackerRequestFailed`] carrying the response body.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("jira responded with {status}: {body}");

        Err(ReleaserError::tracker_request(status.as_u16(), body))
    }
}

/// `Authorization` value for `email:api_key`.
fn basic_auth_header(config: &TrackerConfig) -> Result<HeaderValue> {
    let credentials = BASE64_STANDARD.encode(format!(
        "{}:{}",
        config.email,
        config.api_key.expose_secret()
    ));

    let mut value =
        HeaderValue::from_str(format!("Basic {credentials}").as_str())?;
    value.set_sensitive(true);

    Ok(value)
}

#[async_trait]
impl IssueTracker for Jira {
    async fn load_project(&self) -> Result<TrackerProject> {
        let url = self
            .base_url
            .join(&format!("project/{}", self.config.project_key))?;

        debug!("loading jira project from {url}");

        let response = self.send(self.client.get(url)).await?;
        let project: TrackerProject = response.json().await?;

        info!("loaded jira project {} ({})", project.key, project.id);

        Ok(project)
    }

    async fn ensure_version_exists(
        &self,
        project: &TrackerProject,
        version: &ReleaseVersion,
        release_date: NaiveDate,
    ) -> Result<VersionOutcome> {
        info!("get or create version {version} for {}", project.key);

        let url = self.base_url.join("version")?;
        let payload = CreateVersion::new(project, version, release_date);
        let request = self.client.post(url).json(&payload);

        match self.send(request).await {
            Ok(_) => {
                info!("created version {version}");
                Ok(VersionOutcome::Created)
            }
            Err(ReleaserError::TrackerRequestFailed { status, body }) => {
                match classify_version_error(&body) {
                    Some(outcome) => {
                        info!("version is already on Jira, moving on");
                        Ok(outcome)
                    }
                    None => Err(ReleaserError::tracker_request(status, body)),
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn attach_version_to_issue(
        &self,
        issue: &str,
        version: &ReleaseVersion,
    ) -> Result<()> {
        info!("mark issue {issue} fixed by {version}");

        let url = self.base_url.join(&format!("issue/{issue}"))?;
        let request = self.client.put(url).json(&AddFixVersion::new(version));

        self.send(request).await?;

        Ok(())
    }
}
