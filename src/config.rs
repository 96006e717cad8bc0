use crate::dates::DatePolicy;
use crate::roster::Roster;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_STUDENTS: &[&str] = &[
    "Aravindh",
    "Aswin",
    "Bhavana",
    "Gokul",
    "Hariharan",
    "Meenatchi",
    "Sivabarathi",
    "Visalstephenraj",
];

pub const DEFAULT_COURSES: &[&str] = &[
    "Software Engineering",
    "Maths",
    "Data Structure",
    "Hindhi",
    "Information Security",
    "Frontend Programming",
    "Mobile Application",
];

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    pub students: Vec<String>,
    pub courses: Vec<String>,
    pub date_policy: DatePolicy,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            students: DEFAULT_STUDENTS.iter().map(|s| s.to_string()).collect(),
            courses: DEFAULT_COURSES.iter().map(|s| s.to_string()).collect(),
            date_policy: DatePolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> anyhow::Result<Config> {
        serde_json::from_str(text).context("config is not valid JSON for rollbookd")
    }

    /// Reads a config file; `None` yields the defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        Config::from_json_str(&text)
            .with_context(|| format!("failed to load config {}", path.to_string_lossy()))
    }

    pub fn roster(&self) -> Roster {
        Roster::seeded(&self.students, &self.courses)
    }
}
