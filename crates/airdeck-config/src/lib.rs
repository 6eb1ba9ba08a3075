//! Persistent configuration for airdeck.
//!
//! A single TOML file holds dashboard defaults and the ip -> friendly name
//! map. Values from `AIRDECK_*` environment variables override the file.
//! Loading never fails the dashboard: callers fall back to defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
///
/// ```toml
/// [defaults]
/// interval = 15
/// fahrenheit = true
///
/// [devices]
/// "192.168.1.40" = "Kitchen"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Dashboard defaults, overridden by CLI flags.
    #[serde(default)]
    pub defaults: Defaults,

    /// Friendly names keyed by device IP.
    #[serde(default)]
    pub devices: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    /// Seconds between poll passes.
    pub interval: Option<u64>,

    #[serde(default)]
    pub fahrenheit: bool,

    #[serde(default = "default_discovery")]
    pub discovery: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            interval: None,
            fahrenheit: false,
            discovery: default_discovery(),
        }
    }
}

fn default_discovery() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "airdeck", "airdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("airdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, with `AIRDECK_` env vars layered on top.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = file_figment(path).merge(Env::prefixed("AIRDECK_").split("_"));
    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        debug!(error = %e, "config unreadable, using defaults");
        Config::default()
    })
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Replace the stored name map, keeping every other setting in the file.
///
/// Environment overrides are not read here so they never get written back
/// to disk. A file that exists but does not parse is left untouched and
/// reported as an error.
pub fn save_names(names: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    save_names_to(&config_path(), names)
}

pub fn save_names_to(path: &Path, names: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    let mut cfg: Config = file_figment(path).extract()?;
    cfg.devices.clone_from(names);
    save_config_to(path, &cfg)
}
