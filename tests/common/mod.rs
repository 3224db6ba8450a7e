//! Common test utilities and helpers for repo-privatizer tests
#![allow(dead_code)]

use repo_privatizer::config::GitHubConfig;
use repo_privatizer::{ExclusionList, GitHubClient, Privatizer};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "octo";
pub const TOKEN: &str = "test-token";

/// Mock GitHub repository data for testing
#[derive(Debug, Clone)]
pub struct MockRepository {
    pub name: String,
    pub full_name: String,
    pub is_fork: bool,
    pub is_private: bool,
    pub url: Option<String>,
}

impl MockRepository {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: format!("{}/{}", OWNER, name),
            is_fork: false,
            is_private: false,
            url: None,
        }
    }

    pub fn as_fork(mut self) -> Self {
        self.is_fork = true;
        self
    }

    pub fn as_private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Point the update call somewhere other than the mock server
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn api_path(&self) -> String {
        format!("/repos/{}", self.full_name)
    }

    /// Listing entry as GitHub would send it, extra fields included
    pub fn to_json(&self, server: &MockServer) -> serde_json::Value {
        let url = self
            .url
            .clone()
            .unwrap_or_else(|| format!("{}{}", server.uri(), self.api_path()));
        json!({
            "id": 42,
            "node_id": "R_test",
            "name": self.name,
            "full_name": self.full_name,
            "private": self.is_private,
            "fork": self.is_fork,
            "url": url,
            "html_url": format!("https://github.com/{}", self.full_name),
            "description": "Test repository",
            "size": 120,
            "default_branch": "main"
        })
    }
}

/// Test data sets for common scenarios
pub struct TestDataSets;

impl TestDataSets {
    /// A, a fork B, and C
    pub fn abc() -> Vec<MockRepository> {
        vec![
            MockRepository::new("A"),
            MockRepository::new("B").as_fork(),
            MockRepository::new("C"),
        ]
    }
}

/// Serve `repos` as a single listing page for `OWNER`
pub async fn mount_listing(server: &MockServer, repos: &[MockRepository]) {
    let body: Vec<_> = repos.iter().map(|r| r.to_json(server)).collect();
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", OWNER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Expect exactly `times` update calls for `repo`, answering with `status`
pub async fn mount_update(server: &MockServer, repo: &MockRepository, status: u16, times: u64) {
    Mock::given(method("PATCH"))
        .and(path(repo.api_path()))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

pub fn github_config(server: &MockServer) -> GitHubConfig {
    GitHubConfig {
        api_url: server.uri(),
        ..Default::default()
    }
}

pub fn privatizer(server: &MockServer, exclusions: &str, dry_run: bool) -> Privatizer {
    let client = GitHubClient::new(&github_config(server), TOKEN).expect("Failed to build client");
    let exclusions = ExclusionList::parse(exclusions);
    Privatizer::new(client, exclusions, dry_run)
}

/// Progress lines with the timing stripped from the summary line
pub fn report_lines(out: Vec<u8>) -> Vec<String> {
    String::from_utf8(out)
        .expect("Report is not UTF-8")
        .lines()
        .map(strip_timing)
        .collect()
}

fn strip_timing(line: &str) -> String {
    match line.split_once(" in ") {
        Some((head, tail)) if line.starts_with("Privatized ") && tail.ends_with(" ms.") => {
            format!("{} in <N> ms.", head)
        }
        _ => line.to_string(),
    }
}
