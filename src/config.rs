//! Settings read from `config.yaml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    pub decimal: bool,
    pub hex: bool,
    pub scientific: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat {
            decimal: true,
            hex: false,
            scientific: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub file: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            enabled: true,
            file: PathBuf::from("history.yaml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_format: OutputFormat,
    /// Prefix results with labels such as `Result: `.
    pub output_prompt: bool,
    /// Digits after the decimal point.
    pub precision: usize,
    pub history: HistoryConfig,
    /// Append log output to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_format: OutputFormat::default(),
            output_prompt: true,
            precision: 2,
            history: HistoryConfig::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Config> {
        // An empty document deserializes to unit, not to an empty mapping.
        if text.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(text).context("invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        Config::from_yaml(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Looks for `config.yaml` in the current directory and each of its
    /// ancestors. Returns the defaults when there is none.
    pub fn discover() -> Result<Config> {
        let cwd = env::current_dir().context("failed to get current directory")?;

        match find_upwards(&cwd, CONFIG_FILE) {
            Some(path) => Config::load(&path),
            None => Ok(Config::default()),
        }
    }
}

/// First `dir/name` that is a file, walking from `start` to the root.
pub fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}
