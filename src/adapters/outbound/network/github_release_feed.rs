use super::http_transport::{HttpTransport, ReqwestTransport};
use crate::ports::outbound::ReleaseFeed;
use crate::release_audit::domain::Release;
use crate::shared::error::AuditError;
use crate::shared::Result;

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 25;

/// GitHubReleaseFeed adapter listing the most recent releases of a repository
///
/// Issues a single `GET /repos/{owner}/{name}/releases?per_page=N`; the
/// listing is not paginated further.
pub struct GitHubReleaseFeed<T = ReqwestTransport> {
    transport: T,
    api_url: String,
    repository: String,
    per_page: u32,
    token: Option<String>,
}

impl GitHubReleaseFeed {
    pub fn new(repository: &str) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?, repository))
    }
}

impl<T: HttpTransport> GitHubReleaseFeed<T> {
    pub fn with_transport(transport: T, repository: &str) -> Self {
        Self {
            transport,
            api_url: GITHUB_API_URL.to_string(),
            repository: repository.to_string(),
            per_page: DEFAULT_PER_PAGE,
            token: None,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn releases_url(&self) -> Result<String> {
        let Some((owner, name)) = self.repository.split_once('/') else {
            return Err(AuditError::Validation {
                message: format!(
                    "repository '{}' must be given as owner/name",
                    self.repository
                ),
            }
            .into());
        };
        Ok(format!(
            "{}/repos/{}/{}/releases?per_page={}",
            self.api_url,
            urlencoding::encode(owner),
            urlencoding::encode(name),
            self.per_page
        ))
    }

    fn feed_error(&self, details: String) -> anyhow::Error {
        AuditError::ReleaseFeedError {
            repository: self.repository.clone(),
            details,
        }
        .into()
    }
}

impl<T: HttpTransport> ReleaseFeed for GitHubReleaseFeed<T> {
    fn source(&self) -> String {
        self.repository.clone()
    }

    fn fetch_releases(&self) -> Result<Vec<Release>> {
        let url = self.releases_url()?;
        let bearer = self.token.as_ref().map(|t| format!("Bearer {}", t));
        let mut headers = vec![
            ("Accept", "application/vnd.github+json"),
            ("X-GitHub-Api-Version", "2022-11-28"),
        ];
        if let Some(bearer) = &bearer {
            headers.push(("Authorization", bearer.as_str()));
        }

        tracing::debug!(url = %url, "listing releases");
        let response = self
            .transport
            .get(&url, &headers)
            .map_err(|e| self.feed_error(format!("{:#}", e)))?;

        if response.status != 200 {
            return Err(self.feed_error(format!("HTTP status {}", response.status)));
        }

        let releases: Vec<Release> = serde_json::from_str(&response.body)
            .map_err(|e| self.feed_error(format!("unexpected response body: {}", e)))?;
        for release in &releases {
            release
                .validate()
                .map_err(|e| self.feed_error(e.to_string()))?;
        }

        tracing::debug!(count = releases.len(), "releases listed");
        Ok(releases)
    }
}
