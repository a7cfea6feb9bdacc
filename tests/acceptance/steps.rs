use crate::TrackerWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use gssoc_tracker::config::Config;
use gssoc_tracker::github::search::{FetchError, IssueSource, SearchQuery};
use gssoc_tracker::run::sync_readme;
use std::path::PathBuf;

const REPO_URL: &str = "https://github.com/rookiecoder910/pixelpholio";

/// Serves the scenario's canned search result. `None` behaves like an outage.
struct FixtureSource(Option<Vec<serde_json::Value>>);

impl IssueSource for FixtureSource {
    async fn search_issues(
        &self,
        _query: &SearchQuery,
    ) -> Result<Vec<serde_json::Value>, FetchError> {
        self.0.clone().ok_or_else(|| FetchError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "Service Unavailable".to_string(),
        })
    }
}

fn readme_path(world: &TrackerWorld) -> PathBuf {
    world
        .workdir
        .as_ref()
        .expect("README fixture not set up")
        .path()
        .join("Readme.md")
}

fn read_readme(world: &TrackerWorld) -> String {
    std::fs::read_to_string(readme_path(world)).expect("Failed to read README fixture")
}

async fn run_tracker(world: &mut TrackerWorld) {
    let config = Config {
        readme_path: readme_path(world),
        ..Config::default()
    };
    let source = FixtureSource(world.search_items.clone());

    let mut buffer: Vec<u8> = Vec::new();
    let writer: Option<&mut dyn std::io::Write> = Some(&mut buffer);
    let outcome = sync_readme(&config, &source, writer)
        .await
        .expect("sync should not error");

    world.captured_output.extend(buffer);
    world.outcome = Some(outcome);
}

#[given("the README contains:")]
async fn given_readme_contains(world: &mut TrackerWorld, step: &Step) {
    let content = step
        .docstring
        .as_ref()
        .expect("Expected docstring with README content");
    let content = format!("{}\n", content.trim());

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("Readme.md"), &content).expect("Failed to write README");
    world.workdir = Some(dir);
    world.original_readme = content;
}

#[given(regex = r#"^the README heading "(.*)" is renamed to "(.*)"$"#)]
async fn given_heading_renamed(world: &mut TrackerWorld, from: String, to: String) {
    let content = world.original_readme.replace(&from, &to);
    std::fs::write(readme_path(world), &content).expect("Failed to write README");
    world.original_readme = content;
}

#[given("the search API returns these issues:")]
async fn given_search_returns(world: &mut TrackerWorld, step: &Step) {
    let table = step.table.as_ref().expect("Expected an issue table");
    let items = table
        .rows
        .iter()
        .skip(1)
        .map(|row| {
            let number: u64 = row[0].parse().expect("issue number");
            let labels: Vec<serde_json::Value> = row[3]
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(|label| serde_json::json!({ "name": label }))
                .collect();
            let assignee = if row[4].trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::json!({ "login": row[4].trim() })
            };
            serde_json::json!({
                "number": number,
                "title": row[1],
                "html_url": format!("{REPO_URL}/issues/{number}"),
                "state": row[2],
                "labels": labels,
                "assignee": assignee,
                "created_at": "2024-10-01T09:00:00Z"
            })
        })
        .collect();
    world.search_items = Some(items);
}

#[given("the search API returns no issues")]
async fn given_search_returns_nothing(world: &mut TrackerWorld) {
    world.search_items = Some(Vec::new());
}

#[given("the search API is unavailable")]
async fn given_search_unavailable(world: &mut TrackerWorld) {
    world.search_items = None;
}

#[when("the tracker runs")]
async fn when_tracker_runs(world: &mut TrackerWorld) {
    run_tracker(world).await;
    world.first_run_readme = Some(read_readme(world));
}

#[when("the tracker runs again")]
async fn when_tracker_runs_again(world: &mut TrackerWorld) {
    run_tracker(world).await;
}

#[then(regex = r"^the run should exit with code (\d+)$")]
async fn then_exit_code(world: &mut TrackerWorld, code: u8) {
    let outcome = world.outcome.expect("tracker has not run");
    assert_eq!(
        outcome.exit_code(),
        code,
        "Unexpected outcome {:?}, output:\n---\n{}\n---",
        outcome,
        String::from_utf8_lossy(&world.captured_output)
    );
}

#[then("the README should contain:")]
async fn then_readme_contains(world: &mut TrackerWorld, step: &Step) {
    let expected = step
        .docstring
        .as_ref()
        .expect("Expected docstring with README excerpt");
    let expected = expected.trim();
    let readme = read_readme(world);
    assert!(
        readme.contains(expected),
        "Expected README to contain:\n---\n{}\n---\nbut got:\n---\n{}\n---",
        expected,
        readme
    );
}

#[then("the README should be unchanged")]
async fn then_readme_unchanged(world: &mut TrackerWorld) {
    assert_eq!(read_readme(world), world.original_readme);
}

#[then("the README should be the same as after the first run")]
async fn then_readme_same_as_first(world: &mut TrackerWorld) {
    let first = world
        .first_run_readme
        .as_ref()
        .expect("tracker has not run");
    assert_eq!(&read_readme(world), first);
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_contains(world: &mut TrackerWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}
