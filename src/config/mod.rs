use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Path to a fleet JSON file. Falls back to the embedded fleet.
    #[serde(default)]
    pub fleet_path: Option<String>,

    /// Telemetry tick interval in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Chart series capacity (points kept per series).
    #[serde(default)]
    pub series_capacity: Option<usize>,
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("DRONEDECK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("dronedeck").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("dronedeck").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "dronedeck", "dronedeck")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("dronedeck"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("dronedeck"));
    }
    directories::ProjectDirs::from("io", "dronedeck", "dronedeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
}
