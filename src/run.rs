use crate::classify::{self, Tier};
use crate::cli;
use crate::config::{self, Config};
use crate::github::search::{self, GitHubSearchClient, IssueSource, SearchQuery};
use crate::output;
use crate::readme::ReadmePatcher;
use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

/// How a tracker run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Updated,
    /// `--help` or `--version` was printed.
    Help,
    /// The search succeeded but matched nothing; the README is left alone.
    NoIssues,
    FetchFailed,
    PatchFailed,
    ConfigError,
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Updated | RunOutcome::Help | RunOutcome::NoIssues => 0,
            RunOutcome::FetchFailed => 1,
            RunOutcome::PatchFailed => 2,
            RunOutcome::ConfigError => 3,
        }
    }

    /// Errors that escape [`run`] count as run-level failures, never as a
    /// fetch failure.
    pub fn from_result(result: anyhow::Result<RunOutcome>) -> RunOutcome {
        result.unwrap_or_else(|err| {
            error!("{err:#}");
            RunOutcome::ConfigError
        })
    }
}

impl From<RunOutcome> for ExitCode {
    fn from(outcome: RunOutcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Entry point shared by the binary and the acceptance tests.
///
/// Builds the configuration from `args`, `.gssoc/config.json` and the
/// environment, then runs one sync against the live GitHub API.
pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<RunOutcome> {
    let cli = match cli::parser::parse_args(&args) {
        Ok(cli) => cli,
        Err(err) => {
            let is_info = matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            );
            output::println(err.render().to_string().trim_end(), &mut stdout_additional)?;
            return Ok(if is_info {
                RunOutcome::Help
            } else {
                RunOutcome::ConfigError
            });
        }
    };

    let config = match load_run_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            output::println(&format!("Configuration error: {err:#}"), &mut stdout_additional)?;
            return Ok(RunOutcome::ConfigError);
        }
    };

    let client = match GitHubSearchClient::from_config(&config) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to create HTTP client: {err}");
            return Ok(report_fetch_failure(
                &config.program_name,
                &mut stdout_additional,
            )?);
        }
    };

    sync_readme(&config, &client, stdout_additional).await
}

/// An explicit `--config` file must exist; the project default is optional.
fn load_run_config(cli: &cli::parser::Cli) -> anyhow::Result<Config> {
    let base = match &cli.config {
        Some(path) => {
            let content = std::fs::read(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            config::parse_config(&content)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => config::load_config(&config::project_config_path(Path::new(".")))?,
    };
    Ok(config::apply_overrides(&base, &cli.overrides()))
}

fn report_fetch_failure(
    program: &str,
    out: &mut Option<&mut dyn std::io::Write>,
) -> std::io::Result<RunOutcome> {
    output::println(&format!("No {program} issues found or error occurred."), out)?;
    Ok(RunOutcome::FetchFailed)
}

/// Fetch, classify and patch: one full tracker run against `source`.
pub async fn sync_readme<S: IssueSource>(
    config: &Config,
    source: &S,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<RunOutcome> {
    let program = &config.program_name;
    let readme_name = config.readme_path.display().to_string();
    let out = &mut stdout_additional;

    output::println(&format!("🌟 {program} Issue Tracker Updater"), out)?;
    output::println(&"=".repeat(40), out)?;

    output::println(&format!("Fetching {program} issues from GitHub..."), out)?;
    let query = SearchQuery::for_program(&config.repository, &config.program_labels);
    let issues = match search::fetch_program_issues(source, &query).await {
        Ok(issues) => issues,
        Err(err) => {
            error!(repository = %config.repository, "Error fetching issues: {err}");
            return Ok(report_fetch_failure(program, out)?);
        }
    };
    output::println(&format!("Found {} {program} issues", issues.len()), out)?;

    if issues.is_empty() {
        output::println(&format!("No {program} issues found or error occurred."), out)?;
        return Ok(RunOutcome::NoIssues);
    }

    output::println("Categorizing issues by difficulty...", out)?;
    let buckets = classify::categorize(issues, &config.tiers);

    output::println("", out)?;
    output::println("📊 Issue Summary:", out)?;
    for tier in Tier::ALL {
        let count = buckets.get(tier).len();
        info!(tier = tier.as_str(), count, "categorized");
        output::println(&format!("  {tier}: {count} issues"), out)?;
    }

    output::println("", out)?;
    output::println(&format!("Updating {readme_name}..."), out)?;
    let patcher = ReadmePatcher::new(&config.anchors, program);
    match patcher.patch_file(&config.readme_path, &buckets) {
        Ok(stats) => {
            output::println(&format!("{readme_name} updated successfully!"), out)?;
            output::println(
                &format!(
                    "Statistics: {} total, {} open, {} completed",
                    stats.total, stats.open, stats.completed
                ),
                out,
            )?;
            output::println(
                &format!("✅ {program} issue tracking completed successfully!"),
                out,
            )?;
            Ok(RunOutcome::Updated)
        }
        Err(err) => {
            error!("Error updating {readme_name}: {err}");
            output::println(&format!("❌ Failed to update {readme_name}"), out)?;
            Ok(RunOutcome::PatchFailed)
        }
    }
}
