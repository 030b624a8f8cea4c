//! raw.githubusercontent.com document source

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{FETCH_TIMEOUT_MS, SourceUrls, USER_AGENT};
use crate::version::error::FetchError;
use crate::version::source::{DocumentSource, UpstreamDocument};

/// Fetches upstream documents over HTTP(S)
pub struct GitHubRawSource {
    client: reqwest::Client,
    urls: SourceUrls,
}

impl GitHubRawSource {
    /// Creates a new GitHubRawSource reading from the given URLs
    pub fn new(urls: SourceUrls) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .build()?;

        Ok(Self { client, urls })
    }

    fn url(&self, document: UpstreamDocument) -> &str {
        match document {
            UpstreamDocument::ReleaseTags => &self.urls.release_tags,
            UpstreamDocument::Revisions => &self.urls.revisions,
            UpstreamDocument::Changelog => &self.urls.changelog,
        }
    }
}

#[async_trait::async_trait]
impl DocumentSource for GitHubRawSource {
    fn location(&self, document: UpstreamDocument) -> String {
        self.url(document).to_string()
    }

    async fn fetch_text(&self, document: UpstreamDocument) -> Result<String, FetchError> {
        let url = self.url(document);
        debug!("Fetching {}: {}", document.as_str(), url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.raw")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            warn!("Upstream returned status {}: {}", status, url);
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes for {}", body.len(), document.as_str());

        Ok(body)
    }
}
