use crate::config::{Overrides, Repository};
use clap::Parser;
use std::path::PathBuf;

/// Sync program issues from GitHub into the README's difficulty sections.
#[derive(Debug, Parser, PartialEq)]
#[command(name = "gssoc-tracker", version, about)]
pub struct Cli {
    /// Project config file. Defaults to .gssoc/config.json when present.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository to search, as <owner>/<repo>.
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<Repository>,

    /// README file to patch in place.
    #[arg(long, value_name = "FILE")]
    pub readme: Option<PathBuf>,

    /// GitHub API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// API token. Unauthenticated requests are rate limited.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            repository: self.repo.clone(),
            readme_path: self.readme.clone(),
            api_base_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            token: self.token.clone(),
        }
    }
}

/// Parse command line arguments (including program name).
pub fn parse_args(args: &[String]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}
