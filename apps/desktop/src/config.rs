use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use client_core::ClientConfig;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "filmoteka.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    probe_interval_ms: Option<u64>,
    slow_probe_ms: Option<u64>,
}

/// Defaults, then the config file, then `APP__*` environment overrides.
///
/// A missing default file is fine; a missing explicit file is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::default();

    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file(&mut config, file_cfg);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    }

    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

fn apply_file(config: &mut ClientConfig, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.base_url {
        config.base_url = v;
    }
    if let Some(v) = file_cfg.probe_interval_ms {
        config.probe_interval = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.slow_probe_ms {
        config.slow_probe_threshold = Some(Duration::from_millis(v));
    }
}

pub(crate) fn apply_env(config: &mut ClientConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("APP__BASE_URL") {
        config.base_url = v;
    }
    if let Some(ms) = parse_millis(&var, "APP__PROBE_INTERVAL_MS") {
        config.probe_interval = Duration::from_millis(ms);
    }
    if let Some(ms) = parse_millis(&var, "APP__SLOW_PROBE_MS") {
        config.slow_probe_threshold = Some(Duration::from_millis(ms));
    }
}

fn parse_millis(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = var(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(error) => {
            warn!(key, value = %raw, %error, "ignoring invalid millisecond setting");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
