//! Past evaluations, kept as a YAML document of sessions.

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub timestamp: String,
    pub expression: String,
    pub result: f64,
    /// Entered as postfix words rather than infix.
    #[serde(default)]
    pub rpn: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl History {
    /// Reads the history file. A missing or unreadable file starts a fresh
    /// history.
    pub fn load(path: &Path) -> History {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return History::default(),
            Err(e) => {
                warn!("failed to read history {}: {}", path.display(), e);
                return History::default();
            }
        };

        if text.trim().is_empty() {
            return History::default();
        }

        match serde_yaml::from_str(&text) {
            Ok(history) => history,
            Err(e) => {
                warn!("ignoring corrupt history {}: {}", path.display(), e);
                History::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_yaml::to_string(self).context("failed to serialize history")?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn record(&mut self, expression: &str, result: f64, rpn: bool) {
        self.sessions.push(Session {
            timestamp: Local::now().format("%a %b %e %H:%M:%S %Y").to_string(),
            expression: expression.into(),
            result,
            rpn,
        });
    }

    pub fn session(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Loads, records and saves in one go.
pub fn append(path: &Path, expression: &str, result: f64, rpn: bool) -> Result<()> {
    let mut history = History::load(path);
    history.record(expression, result, rpn);
    history.save(path)
}
