use cucumber::World;
use gssoc_tracker::run::RunOutcome;
use tempfile::TempDir;

#[derive(Debug, Default, World)]
pub struct TrackerWorld {
    pub workdir: Option<TempDir>,
    pub original_readme: String,
    pub first_run_readme: Option<String>,
    pub search_items: Option<Vec<serde_json::Value>>,
    pub captured_output: Vec<u8>,
    pub outcome: Option<RunOutcome>,
}

#[tokio::main]
async fn main() {
    TrackerWorld::run("features").await;
}

mod steps;
