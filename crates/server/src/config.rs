use std::{fs, path::Path};

use serde::Deserialize;
use shared::domain::Film;
use tracing::warn;

pub const SETTINGS_FILE: &str = "film_stub.toml";

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub films: Vec<Film>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8090".into(),
            films: default_catalog(),
        }
    }
}

fn default_catalog() -> Vec<Film> {
    [
        ("Dune", 2021, true),
        ("Arrival", 2016, false),
        ("Blade Runner 2049", 2017, false),
    ]
    .into_iter()
    .map(|(title, release_year, is_watched)| Film {
        title: title.into(),
        release_year,
        is_watched,
    })
    .collect()
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    films: Option<Vec<Film>>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_from(path: &Path, var: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.bind_addr = v;
                }
                if let Some(v) = file_cfg.films {
                    settings.films = v;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = var("SERVER_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
