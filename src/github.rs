use anyhow::{anyhow, Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GitHubConfig;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// A hosted repository as returned by the listing endpoint and sent on update.
///
/// Any field of the listing response not named here is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    /// `owner/name`, used for display and exclusion matching
    pub full_name: String,

    /// Whether this repository is a fork of another
    pub fork: bool,

    /// Visibility flag
    pub private: bool,

    /// API resource URL, target of the update call
    pub url: String,
}

impl Repository {
    /// Update payload that makes this repository private
    pub fn privatized(&self) -> Self {
        Self {
            full_name: self.full_name.clone(),
            fork: false,
            private: true,
            url: self.url.clone(),
        }
    }
}

/// Thin GitHub REST client covering repository listing and visibility updates
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    api_version: String,
    per_page: u32,
    max_pages: u32,
    authenticate_listing: bool,
    token: String,
}

impl GitHubClient {
    /// Create a new client that authenticates updates with `token`
    pub fn new(config: &GitHubConfig, token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(anyhow!("GitHub token must not be empty"));
        }

        let api_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid GitHub API URL: {}", config.api_url))?;
        if api_url.cannot_be_a_base() {
            return Err(anyhow!("GitHub API URL cannot be a base: {}", config.api_url));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_url,
            api_version: config.api_version.clone(),
            per_page: config.per_page.clamp(1, 100),
            max_pages: config.max_pages.max(1),
            authenticate_listing: config.authenticate_listing,
            token: token.to_string(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// `{api}/users/{username}/repos`, with `username` encoded as a single path segment
    fn repos_url(&self, username: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("GitHub API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        Ok(url)
    }

    /// List every repository owned by `username`, in listing order.
    ///
    /// Pages are requested one after another until a short page comes back
    /// or the configured page cap is reached.
    pub async fn list_user_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        debug!("Fetching repositories for: {}", username);

        let url = self.repos_url(username)?;
        let mut repositories = Vec::new();

        for page in 1..=self.max_pages {
            let mut request = self
                .http
                .get(url.clone())
                .header(ACCEPT, GITHUB_JSON)
                .query(&[("per_page", self.per_page), ("page", page)]);

            if self.authenticate_listing {
                request = request.header(AUTHORIZATION, self.bearer());
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to fetch repositories page {}", page))?
                .error_for_status()
                .with_context(|| format!("GitHub rejected repositories page {}", page))?;

            let items: Vec<Repository> = response
                .json()
                .await
                .with_context(|| format!("Failed to parse repositories page {}", page))?;

            let count = items.len();
            debug!("Page {} returned {} repositories", page, count);
            repositories.extend(items);

            if count < self.per_page as usize {
                info!("Found {} repositories for {}", repositories.len(), username);
                return Ok(repositories);
            }
        }

        warn!(
            "Reached maximum pagination limit ({} pages) for {}",
            self.max_pages, username
        );
        Ok(repositories)
    }

    /// Ask GitHub to make `repository` private and return the response status
    pub async fn set_private(&self, repository: &Repository) -> Result<StatusCode> {
        let body = serde_json::to_string(&repository.privatized())
            .context("Failed to serialize update payload")?;

        let response = self
            .http
            .patch(&repository.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, GITHUB_JSON)
            .header(AUTHORIZATION, self.bearer())
            .header(API_VERSION_HEADER, &self.api_version)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to update {}", repository.full_name))?;

        debug!("PATCH {} -> {}", repository.url, response.status());
        Ok(response.status())
    }
}
