use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::tape::{BoundaryPolicy, DEFAULT_CAPACITY};

pub const CONFIG_FILE_NAME: &str = "bf.toml";

/// Settings read from the `[interpreter]` section of the config file.
/// Every field is optional; absent fields fall through to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub policy: Option<BoundaryPolicy>,
    pub capacity: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub max_steps: Option<u64>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub policy: Option<BoundaryPolicy>,
    pub capacity: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub max_steps: Option<u64>,
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub policy: BoundaryPolicy,
    pub capacity: usize,
    pub timeout_ms: Option<u64>,
    pub max_steps: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: BoundaryPolicy::default(),
            capacity: DEFAULT_CAPACITY,
            timeout_ms: None,
            max_steps: None,
        }
    }
}

impl Settings {
    /// Resolve flags -> env -> file -> defaults.
    ///
    /// `env` looks up a variable by name so callers and tests can supply
    /// their own environment.
    pub fn resolve<F>(overrides: Overrides, env: F, file: FileSettings) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let policy = overrides
            .policy
            .or_else(|| env("BF_POLICY").and_then(|s| s.parse().ok()))
            .or(file.policy)
            .unwrap_or(defaults.policy);
        let capacity = overrides
            .capacity
            .or_else(|| env("BF_CAPACITY").and_then(|s| s.trim().parse().ok()))
            .or(file.capacity)
            .filter(|&c| c > 0)
            .unwrap_or(defaults.capacity);
        let timeout_ms = overrides
            .timeout_ms
            .or_else(|| env("BF_TIMEOUT_MS").and_then(|s| s.trim().parse().ok()))
            .or(file.timeout_ms);
        let max_steps = overrides
            .max_steps
            .or_else(|| env("BF_MAX_STEPS").and_then(|s| s.trim().parse().ok()))
            .or(file.max_steps);

        Self { policy, capacity, timeout_ms, max_steps }
    }
}

/// `bf.toml` under the XDG config home.
///
/// On Linux this resolves to /home/<user>/.config/bf.toml, on macOS to
/// /Users/<user>/.config/bf.toml.
pub fn default_config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

/// Load file settings from `path`, or from the default location when `None`.
/// A missing or unreadable file yields empty settings.
pub fn load(path: Option<&Path>) -> FileSettings {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return FileSettings::default(),
        },
    };

    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "loaded config file");
            parse_settings(&content)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no config file");
            FileSettings::default()
        }
    }
}

/// Small line-oriented reader: finds the `[interpreter]` section and its
/// `key = value` pairs. Values may be quoted or bare; `#` starts a comment line.
pub fn parse_settings(content: &str) -> FileSettings {
    let mut in_section = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_section = line[1..line.len() - 1].trim() == "interpreter";
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq + 1..].trim();
            let val = if val_raw.len() >= 2 && val_raw.starts_with('"') && val_raw.ends_with('"') {
                val_raw[1..val_raw.len() - 1].to_string()
            } else {
                val_raw.to_string()
            };
            map.insert(key, val);
        }
    }

    let mut settings = FileSettings::default();
    for (key, val) in &map {
        match key.as_str() {
            "policy" => match val.parse() {
                Ok(p) => settings.policy = Some(p),
                Err(e) => warn!(key = %key, "ignoring config value: {e}"),
            },
            "capacity" => settings.capacity = parse_number(key, val),
            "timeout_ms" => settings.timeout_ms = parse_number(key, val),
            "max_steps" => settings.max_steps = parse_number(key, val),
            other => warn!(key = %other, "ignoring unknown config key"),
        }
    }
    settings
}

fn parse_number<T: std::str::FromStr>(key: &str, val: &str) -> Option<T> {
    let parsed = val.replace('_', "").parse().ok();
    if parsed.is_none() {
        warn!(key, value = val, "ignoring config value: not a number");
    }
    parsed
}
