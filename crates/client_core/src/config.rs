use std::{collections::HashMap, fs, path::Path};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/employees";
pub const SETTINGS_FILE: &str = "directory.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

/// Defaults, then `directory.toml` in `dir`, then the environment. Read once
/// at startup. The url is checked when the record client is built.
pub fn load_client_settings(dir: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(dir.join(SETTINGS_FILE)) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!(file = SETTINGS_FILE, "ignoring malformed settings file");
        return;
    };
    if let Some(v) = file_cfg.get("api_url") {
        settings.api_url = v.clone();
    }
}

/// `APP__API_URL` overrides `EMPLOYEE_API_URL`. Blank values are skipped.
pub(crate) fn apply_env_overrides(
    settings: &mut ClientSettings,
    var: impl Fn(&str) -> Option<String>,
) {
    for key in ["EMPLOYEE_API_URL", "APP__API_URL"] {
        if let Some(v) = var(key).filter(|v| !v.trim().is_empty()) {
            settings.api_url = v;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
