use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::format::is_valid_date_format;

pub const SETTINGS_FILE: &str = "fee_entry.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_url: String,
    pub currency_symbol: String,
    pub date_format: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            currency_symbol: "₹".into(),
            date_format: "%-m/%-d/%Y".into(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    currency_symbol: Option<String>,
    date_format: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Server url without a trailing slash, ready for endpoint paths.
    pub fn validated_server_url(&self) -> Result<String, SettingsError> {
        let trimmed = self.server_url.trim();
        let parsed = Url::parse(trimmed).map_err(|source| SettingsError::InvalidServerUrl {
            url: trimmed.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(trimmed.to_string()));
        }
        Ok(trimmed.trim_end_matches('/').to_string())
    }
}

pub fn load_settings() -> ClientSettings {
    let mut settings = load_settings_from(Path::new(SETTINGS_FILE));
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Defaults overlaid with the TOML file at `path`. A missing or unreadable
/// file leaves the defaults in place.
pub fn load_settings_from(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    let Ok(raw) = fs::read_to_string(path) else {
        return settings;
    };
    let file_cfg = match toml::from_str::<FileSettings>(&raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed settings file");
            return settings;
        }
    };

    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.currency_symbol {
        settings.currency_symbol = v;
    }
    if let Some(v) = file_cfg.date_format {
        set_date_format(&mut settings, v);
    }
    if file_cfg.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file_cfg.request_timeout_secs;
    }

    settings
}

pub fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("FEE_ENTRY_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__CURRENCY_SYMBOL") {
        settings.currency_symbol = v;
    }

    if let Some(v) = var("APP__DATE_FORMAT") {
        set_date_format(settings, v);
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }
}

fn set_date_format(settings: &mut ClientSettings, format: String) {
    if is_valid_date_format(&format) {
        settings.date_format = format;
    } else {
        warn!(
            value = %format,
            kept = %settings.date_format,
            "ignoring date format with unknown specifiers"
        );
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
