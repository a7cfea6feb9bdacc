use chrono::{DateTime, Utc};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: IssueState,
    /// Label names, lower-cased, in the order GitHub returned them.
    pub labels: Vec<String>,
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl Issue {
    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}

/// Converts the `items` array of a `/search/issues` response into issues.
///
/// Items that are pull requests, carry an unknown state, or lack one of the
/// required fields are skipped.
pub fn parse_search_items(items: &[serde_json::Value]) -> Vec<Issue> {
    items
        .iter()
        .filter_map(|item| {
            if !item["pull_request"].is_null() {
                return None;
            }
            let parsed = parse_item(item);
            if parsed.is_none() {
                warn!(number = ?item["number"].as_u64(), "skipping malformed search item");
            }
            parsed
        })
        .collect()
}

fn parse_item(item: &serde_json::Value) -> Option<Issue> {
    let (Some(number), Some(title), Some(url), Some(state), Some(created_at)) = (
        item["number"].as_u64(),
        item["title"].as_str(),
        item["html_url"].as_str(),
        item["state"].as_str(),
        item["created_at"].as_str(),
    ) else {
        return None;
    };

    let state = match state {
        "open" => IssueState::Open,
        "closed" => IssueState::Closed,
        _ => return None,
    };
    let created_at = created_at.parse::<DateTime<Utc>>().ok()?;

    let labels = item["labels"]
        .as_array()
        .map(|labels| {
            labels
                .iter()
                .filter_map(|label| label["name"].as_str())
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default();

    let assignee = item["assignee"]["login"].as_str().map(str::to_string);

    Some(Issue {
        number,
        title: title.to_string(),
        url: url.to_string(),
        state,
        labels,
        assignee,
        created_at,
    })
}
