use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use explainer::{GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "redox.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub scenario_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.into(),
            scenario_file: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// `None` when no API key is configured.
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        self.gemini_api_key.as_ref().map(|api_key| GeminiConfig {
            endpoint: self.gemini_endpoint.clone(),
            model: self.gemini_model.clone(),
            api_key: api_key.clone(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    gemini_endpoint: Option<String>,
    scenario_file: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Defaults, then the TOML file, then the process environment.
///
/// An explicit `path` must exist; the default `redox.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };
    if let Some(raw) = raw {
        let file_cfg: FileSettings = toml::from_str(&raw).context("invalid config file")?;
        apply_file(&mut settings, file_cfg);
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = non_empty(file_cfg.gemini_api_key) {
        settings.gemini_api_key = Some(v);
    }
    if let Some(v) = non_empty(file_cfg.gemini_model) {
        settings.gemini_model = v;
    }
    if let Some(v) = non_empty(file_cfg.gemini_endpoint) {
        settings.gemini_endpoint = v;
    }
    if let Some(v) = file_cfg.scenario_file.filter(|p| !p.as_os_str().is_empty()) {
        settings.scenario_file = Some(v);
    }
    if let Some(v) = non_empty(file_cfg.log_filter) {
        settings.log_filter = v;
    }
}

pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| non_empty(var(key));

    for key in ["GEMINI_API_KEY", "API_KEY", "APP__GEMINI_API_KEY"] {
        if let Some(v) = var(key) {
            settings.gemini_api_key = Some(v);
        }
    }
    if let Some(v) = var("APP__GEMINI_MODEL") {
        settings.gemini_model = v;
    }
    if let Some(v) = var("APP__GEMINI_ENDPOINT") {
        settings.gemini_endpoint = v;
    }
    if let Some(v) = var("APP__SCENARIO_FILE") {
        settings.scenario_file = Some(PathBuf::from(v));
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
