//! MindWell configuration.
//!
//! Config file: `$XDG_CONFIG_HOME/mindwell/config.toml` or
//! `~/.config/mindwell/config.toml`. Every section is optional.
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/.local/share/mindwell"
//!
//! [rewards]
//! complete_task = 25
//! mood_track = 15
//! assessment_complete = 50
//! streak_per_day = 5
//! streak_cap = 100
//!
//! [tasks]
//! daily_count = 3
//!
//! [log]
//! level = "warn"
//! ```

use crate::events::WellnessEvent;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the data directory regardless of config
pub const DATA_DIR_ENV: &str = "MINDWELL_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// XP awarded per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub complete_task: u64,
    pub mood_track: u64,
    pub assessment_complete: u64,
    /// Streak bonus per streak day...
    pub streak_per_day: u64,
    /// ...capped at this much per award
    pub streak_cap: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            complete_task: 25,
            mood_track: 15,
            assessment_complete: 50,
            streak_per_day: 5,
            streak_cap: 100,
        }
    }
}

impl RewardConfig {
    /// XP earned by a domain event
    pub fn xp_for(&self, event: &WellnessEvent) -> u64 {
        match event {
            WellnessEvent::TaskCompleted { .. } => self.complete_task,
            WellnessEvent::MoodTracked { .. } => self.mood_track,
            WellnessEvent::AssessmentCompleted { .. } => self.assessment_complete,
            WellnessEvent::StreakMaintained { streak_days } => {
                (*streak_days as u64)
                    .saturating_mul(self.streak_per_day)
                    .min(self.streak_cap)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// How many tasks `tasks generate` schedules
    pub daily_count: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self { daily_count: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// tracing filter directive, e.g. "info" or "mindwell_common=debug"
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindWellConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub rewards: RewardConfig,
    #[serde(default)]
    pub tasks: TaskConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl MindWellConfig {
    /// `$XDG_CONFIG_HOME/mindwell/config.toml`, else `~/.config/mindwell/config.toml`
    pub fn user_config_path() -> Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("mindwell").join("config.toml"));
        }
        let home = std::env::var("HOME").context("Cannot determine home directory")?;
        Ok(Path::new(&home)
            .join(".config")
            .join("mindwell")
            .join("config.toml"))
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. User config
    /// 3. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        if let Ok(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_file(&user_path);
            }
        }
        Ok(Self::default())
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Where the journal documents live.
    ///
    /// `$MINDWELL_DATA_DIR`, then `[storage] data_dir`, then
    /// `$XDG_DATA_HOME/mindwell`, then `~/.local/share/mindwell`.
    pub fn data_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("mindwell");
        }
        match std::env::var("HOME") {
            Ok(home) => Path::new(&home).join(".local").join("share").join("mindwell"),
            Err(_) => PathBuf::from(".mindwell"),
        }
    }
}
