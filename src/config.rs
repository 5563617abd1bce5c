use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::player::RepeatMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub repeat: RepeatMode,
    #[serde(default = "default_bar_count")]
    pub bar_count: usize,
}

fn default_volume() -> f32 {
    1.0
}

fn default_bar_count() -> usize {
    96
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
            bar_count: 96,
        }
    }
}

impl AppConfig {
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("sonara");
        std::fs::create_dir_all(&path).ok();
        path.push("state.toml");
        path
    }

    pub fn load() -> Self {
        let path = Self::get_config_path();
        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        let path = Self::get_config_path();
        if let Ok(content) = toml::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let config = AppConfig {
            volume: 0.35,
            shuffle: true,
            repeat: RepeatMode::All,
            bar_count: 128,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.volume, 0.35);
        assert!(back.shuffle);
        assert_eq!(back.repeat, RepeatMode::All);
        assert_eq!(back.bar_count, 128);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: AppConfig = toml::from_str("shuffle = true").unwrap();
        assert!(config.shuffle);
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert_eq!(config.bar_count, 96);
    }
}
