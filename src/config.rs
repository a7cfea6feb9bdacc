use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Filename for the project-specific configuration within the .gssoc directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".gssoc";

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A GitHub repository in `<owner>/<repo>` form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Repository {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(anyhow::anyhow!(
                "Invalid repository format. Please use <owner>/<repo>."
            )),
        }
    }
}

impl TryFrom<String> for Repository {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Label spellings that put an issue into each difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TierAliases {
    pub beginner: Vec<String>,
    pub intermediate: Vec<String>,
    pub advanced: Vec<String>,
}

impl Default for TierAliases {
    fn default() -> Self {
        Self {
            beginner: strings(&["good-first-issue", "beginner-friendly", "easy"]),
            intermediate: strings(&["intermediate", "medium"]),
            advanced: strings(&["advanced", "hard", "difficult"]),
        }
    }
}

/// Heading and HTML comment pair marking where a generated issue list starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionAnchor {
    pub heading: String,
    pub comment: String,
}

impl SectionAnchor {
    fn new(heading: &str, comment: &str) -> Self {
        Self {
            heading: heading.to_string(),
            comment: comment.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadmeAnchors {
    pub beginner: SectionAnchor,
    pub intermediate: SectionAnchor,
    pub advanced: SectionAnchor,
    pub statistics_heading: String,
}

impl Default for ReadmeAnchors {
    fn default() -> Self {
        Self {
            beginner: SectionAnchor::new(
                "#### 🟢 Beginner-Friendly Issues",
                "<!-- Issues suitable for first-time contributors -->",
            ),
            intermediate: SectionAnchor::new(
                "#### 🟡 Intermediate Issues",
                "<!-- Issues requiring some Android/Kotlin experience -->",
            ),
            advanced: SectionAnchor::new(
                "#### 🔴 Advanced Issues",
                "<!-- Complex issues for experienced contributors -->",
            ),
            statistics_heading: "### 📊 GSSoC Statistics".to_string(),
        }
    }
}

/// Everything a single tracker run needs to know.
///
/// Every field has a default, so an empty or partial config file is valid.
/// Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository: Repository,
    pub readme_path: PathBuf,
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Program name used in console output and in the statistics block.
    pub program_name: String,
    pub program_labels: Vec<String>,
    pub tiers: TierAliases,
    pub anchors: ReadmeAnchors,
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: Repository {
                owner: "rookiecoder910".to_string(),
                name: "pixelpholio".to_string(),
            },
            readme_path: PathBuf::from("Readme.md"),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            program_name: "GSSoC".to_string(),
            program_labels: strings(&["gssoc", "gssoc24", "girl-script"]),
            tiers: TierAliases::default(),
            anchors: ReadmeAnchors::default(),
            token: None,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub repository: Option<Repository>,
    pub readme_path: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub token: Option<String>,
}

/// Parses JSON configuration file content.
///
/// - Returns the default configuration if `content` is empty or whitespace.
/// - Keys missing from the object keep their defaults.
/// - Returns an `Err` if the JSON is malformed or is not an object.
pub fn parse_config(content: &[u8]) -> Result<Config> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Config::default());
    }

    let value: serde_json::Value =
        serde_json::from_slice(content).context("Failed to parse config JSON")?;
    if !value.is_object() {
        return Err(anyhow::anyhow!("Config must be a JSON object"));
    }
    serde_json::from_value(value).context("Invalid config value")
}

/// Reads the config file at `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    match std::fs::read(path) {
        Ok(content) => parse_config(&content)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read config file {}", path.display())),
    }
}

/// Path of the project config file relative to `root`.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME)
}

/// Applies `overrides` on top of `base` and returns the merged configuration.
///
/// `base` is left untouched. An empty token override is treated as absent.
pub fn apply_overrides(base: &Config, overrides: &Overrides) -> Config {
    let mut config = base.clone();
    if let Some(repository) = &overrides.repository {
        config.repository = repository.clone();
    }
    if let Some(path) = &overrides.readme_path {
        config.readme_path = path.clone();
    }
    if let Some(url) = &overrides.api_base_url {
        config.api_base_url = url.clone();
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout_secs = secs;
    }
    if let Some(token) = overrides.token.as_ref().filter(|t| !t.is_empty()) {
        config.token = Some(token.clone());
    }
    config
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
