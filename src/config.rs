use crate::analyzer::ClassifierConfig;
use crate::changelog::ChangelogTemplate;
use crate::domain::TagPattern;
use crate::error::{ChangeReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name looked up in the repository root and the home directory
pub const CONFIG_FILE_NAME: &str = ".git_changerelease.toml";

/// Represents the complete configuration for git-changerelease.
///
/// Contains the classification rules, tag and commit formatting, changelog
/// template and the commands to run before the release commit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Patterns that make a commit a major change
    pub match_major: Vec<String>,

    /// Patterns that make a commit a patch change
    pub match_patch: Vec<String>,

    /// Patterns for commits left out of the changelog and the bump decision
    pub ignore_messages: Vec<String>,

    /// Message of the release commit; `{version}` and `{tag}` are replaced
    pub release_commit_message: String,

    /// Tag name pattern, must contain `{version}`
    pub tag_pattern: String,

    /// Create annotated instead of signed tags
    pub disable_signed_tags: bool,

    /// Shell commands run in the repository root before committing
    pub pre_commit_commands: Vec<String>,

    /// Changelog template, see [`ChangelogTemplate`]
    pub changelog_template: String,
}

/// Returns the default patterns for breaking changes.
fn default_match_major() -> Vec<String> {
    vec![
        r"^[a-z]+(\([^)]*\))?!:".to_string(),
        "^BREAKING[ -]CHANGE:".to_string(),
    ]
}

/// Returns the default patterns for patch-level changes.
fn default_match_patch() -> Vec<String> {
    vec![
        "^fix".to_string(),
        "^docs".to_string(),
        "^style".to_string(),
        "^refactor".to_string(),
        "^perf".to_string(),
        "^test".to_string(),
        "^chore".to_string(),
        "^build".to_string(),
        "^ci".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            match_major: default_match_major(),
            match_patch: default_match_patch(),
            ignore_messages: Vec::new(),
            release_commit_message: "Prepared release {tag}".to_string(),
            tag_pattern: TagPattern::default().as_str().to_string(),
            disable_signed_tags: false,
            pre_commit_commands: Vec::new(),
            changelog_template: ChangelogTemplate::DEFAULT.to_string(),
        }
    }
}

impl Config {
    /// Compile the classification rules for one run
    pub fn classifier(&self) -> Result<ClassifierConfig> {
        ClassifierConfig::new(&self.match_major, &self.match_patch, &self.ignore_messages)
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.tag_pattern.as_str())
    }

    pub fn changelog_template(&self) -> Result<ChangelogTemplate> {
        ChangelogTemplate::new(self.changelog_template.as_str())
    }

    /// Check every pattern and template before any work starts
    pub fn validate(&self) -> Result<()> {
        self.classifier()?;
        self.tag_pattern()?;
        self.changelog_template()?;
        Ok(())
    }

    /// Render the release commit message for a tag
    pub fn commit_message(&self, version: &str, tag: &str) -> String {
        self.release_commit_message
            .replace("{version}", version)
            .replace("{tag}", tag)
    }
}

/// Loads configuration by layering every config file found over the defaults.
///
/// Files are applied in the following order, later ones winning key by key:
/// 1. `~/.git_changerelease.toml` in the user's home directory
/// 2. `.git_changerelease.toml` in the repository root
/// 3. Custom path provided as parameter (must exist)
///
/// Keys set by no file keep their default values.
pub fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ChangeReleaseError::config(format!(
                "config file {} does not exist, use --create-config to create one",
                path.display()
            )));
        }
    }

    let mut paths = candidate_paths(repo_root);
    paths.extend(config_path.map(Path::to_path_buf));
    paths.dedup();

    load_config_files(&paths)
}

/// Merge the top-level keys of every existing file in `paths`, in order,
/// and fill the rest from [`Config::default`]. Missing files are skipped.
pub fn load_config_files<P: AsRef<Path>>(paths: &[P]) -> Result<Config> {
    let mut merged = toml::Table::new();

    for path in paths {
        let path: &Path = path.as_ref();
        if !path.exists() {
            continue;
        }
        debug!(path = %path.display(), "loading config file");
        let table: toml::Table = fs::read_to_string(path)?.parse()?;
        merged.extend(table);
    }

    if merged.is_empty() {
        debug!("no config values found, using defaults");
    }

    let config: Config = toml::Value::Table(merged).try_into()?;
    Ok(config)
}

fn candidate_paths(repo_root: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    if let Some(root) = repo_root {
        paths.push(root.join(CONFIG_FILE_NAME));
    }
    paths
}

/// Write the default configuration to `path` as an editable starting point
pub fn write_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&Config::default())
        .map_err(|e| ChangeReleaseError::config(format!("serializing defaults: {}", e)))?;
    fs::write(path, content)?;
    Ok(())
}
