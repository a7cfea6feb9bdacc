use crate::config::{Config, Repository};
use crate::github::issues::{Issue, parse_search_items};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// GitHub caps a search page at 100 results. Only one page is requested.
pub const PER_PAGE: u32 = 100;

const USER_AGENT: &str = "GSSoC-Issue-Tracker";
const ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API request error: HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A single-page issue search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The `q` expression, e.g. `repo:o/r is:issue (label:"gssoc")`.
    pub expression: String,
    pub per_page: u32,
}

impl SearchQuery {
    pub fn for_program(repo: &Repository, labels: &[String]) -> Self {
        Self {
            expression: build_search_query(repo, labels),
            per_page: PER_PAGE,
        }
    }
}

/// Builds `repo:<owner>/<name> is:issue (label:"a" OR label:"b")`.
pub fn build_search_query(repo: &Repository, labels: &[String]) -> String {
    let labels = labels
        .iter()
        .map(|label| format!("label:\"{label}\""))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("repo:{repo} is:issue ({labels})")
}

/// Somewhere issues can be searched.
#[allow(async_fn_in_trait)]
pub trait IssueSource {
    /// Returns the raw `items` array of one result page.
    async fn search_issues(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<serde_json::Value>, FetchError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// [`IssueSource`] backed by the GitHub REST search endpoint.
pub struct GitHubSearchClient {
    client: reqwest::Client,
    api_base_url: String,
    token: Option<String>,
}

impl GitHubSearchClient {
    pub fn new(
        api_base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            &config.api_base_url,
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl IssueSource for GitHubSearchClient {
    async fn search_issues(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<serde_json::Value>, FetchError> {
        let per_page = query.per_page.to_string();
        let mut request = self
            .client
            .get(format!("{}/search/issues", self.api_base_url))
            .query(&[
                ("q", query.expression.as_str()),
                ("sort", "created"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(FetchError::Status { status, body });
        }

        let text = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&text)?;
        Ok(parsed.items)
    }
}

/// Runs the program search against `source` and parses the result page.
pub async fn fetch_program_issues<S: IssueSource>(
    source: &S,
    query: &SearchQuery,
) -> Result<Vec<Issue>, FetchError> {
    debug!(q = %query.expression, "searching issues");
    let items = source.search_issues(query).await?;
    if items.len() >= query.per_page as usize {
        warn!(
            per_page = query.per_page,
            "search returned a full page; issues beyond the first page are not tracked"
        );
    }
    Ok(parse_search_items(&items))
}
