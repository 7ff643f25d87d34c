use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which correction backend drives the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Length-windowed nearest-neighbor scan.
    Window,
    /// Symmetric-delete candidate index.
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dictionary: Option<PathBuf>,

    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    #[serde(default = "default_window_radius")]
    pub window_radius: usize,

    /// Scan the whole dictionary instead of the length window.
    #[serde(default)]
    pub exhaustive: bool,

    #[serde(default = "default_engine")]
    pub engine: Engine,

    /// Distance cap for the delete engine.
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,

    /// Worker threads; 0 means one per logical CPU.
    #[serde(default)]
    pub jobs: usize,
}

fn default_alphabet() -> String {
    "cyrillic-latin".to_string()
}

fn default_window_radius() -> usize {
    2
}

fn default_engine() -> Engine {
    Engine::Window
}

fn default_max_edit_distance() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            alphabet: default_alphabet(),
            window_radius: default_window_radius(),
            exhaustive: false,
            engine: default_engine(),
            max_edit_distance: default_max_edit_distance(),
            jobs: 0,
        }
    }
}

impl Config {
    /// Load configuration with priority: local config > global config > defaults.
    /// CLI overrides are applied on top by the caller.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(".ocrfix.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        Ok(config)
    }

    /// `None` means unbounded: scan the full dictionary.
    pub fn effective_window(&self) -> Option<usize> {
        if self.exhaustive {
            None
        } else {
            Some(self.window_radius)
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Other's values override self's where they differ from defaults.
        if other.dictionary.is_some() {
            self.dictionary = other.dictionary;
        }
        if other.alphabet != default_alphabet() {
            self.alphabet = other.alphabet;
        }
        if other.window_radius != default_window_radius() {
            self.window_radius = other.window_radius;
        }
        if other.exhaustive {
            self.exhaustive = true;
        }
        if other.engine != default_engine() {
            self.engine = other.engine;
        }
        if other.max_edit_distance != default_max_edit_distance() {
            self.max_edit_distance = other.max_edit_distance;
        }
        if other.jobs != 0 {
            self.jobs = other.jobs;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ocrfix").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window_radius, 2);
        assert_eq!(config.alphabet, "cyrillic-latin");
        assert_eq!(config.engine, Engine::Window);
        assert_eq!(config.effective_window(), Some(2));
    }

    #[test]
    fn test_exhaustive_unbounds_the_window() {
        let config = Config {
            exhaustive: true,
            ..Default::default()
        };
        assert_eq!(config.effective_window(), None);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config::default();
        let override_config = Config {
            dictionary: Some(PathBuf::from("russian.utf-8")),
            window_radius: 3,
            engine: Engine::Delete,
            ..Default::default()
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.dictionary, Some(PathBuf::from("russian.utf-8")));
        assert_eq!(merged.window_radius, 3);
        assert_eq!(merged.engine, Engine::Delete);
        assert_eq!(merged.alphabet, "cyrillic-latin");
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            dictionary = "russian.utf-8"
            alphabet = "cyrillic"
            engine = "delete"
            "#,
        )
        .unwrap();
        assert_eq!(config.alphabet, "cyrillic");
        assert_eq!(config.engine, Engine::Delete);
        assert_eq!(config.max_edit_distance, 2);
    }
}
