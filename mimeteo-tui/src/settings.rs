//! Persisted user settings: last selection and upstream endpoints.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "mimeteo";
const SETTINGS_FILE: &str = "config.toml";

/// Timeouts above this are accepted but flagged.
const MAX_SENSIBLE_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    /// Code of the last selected region, e.g. `SP`.
    #[serde(default)]
    pub last_region: Option<String>,

    /// Name of the last selected municipality.
    #[serde(default)]
    pub last_municipality: Option<String>,

    #[serde(default = "default_locality_base_url")]
    pub locality_base_url: String,

    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// Per-request transport timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_locality_base_url() -> String {
    mimeteo_provider_ibge::BASE_URL.to_owned()
}

fn default_weather_base_url() -> String {
    mimeteo_provider_open_meteo::BASE_URL.to_owned()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_region: None,
            last_municipality: None,
            locality_base_url: default_locality_base_url(),
            weather_base_url: default_weather_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SettingsIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Validation {
    pub errors: Vec<SettingsIssue>,
    pub warnings: Vec<SettingsIssue>,
}

impl Validation {
    pub(crate) fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(SettingsIssue {
            field,
            message: message.into(),
        });
    }

    fn warning(&mut self, field: &'static str, message: impl Into<String>) {
        self.warnings.push(SettingsIssue {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Settings {
    /// Directory holding the settings file and the log.
    pub(crate) fn app_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join(APP_DIR))
    }

    /// Load settings from the default location, writing defaults on first run.
    pub(crate) fn load() -> Result<Self> {
        Self::load_from(&Self::app_dir()?.join(SETTINGS_FILE))
    }

    /// Load settings from `path`, writing defaults there if it does not exist.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        let settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        Ok(settings)
    }

    /// Load settings and reject them when validation finds errors.
    pub(crate) fn load_validated() -> Result<Self> {
        let settings = Self::load()?;
        let validation = settings.validate();

        if !validation.is_valid() {
            anyhow::bail!("Invalid settings: {}", validation.error_summary());
        }

        for warning in &validation.warnings {
            tracing::warn!("Settings warning: {warning}");
        }

        Ok(settings)
    }

    /// Save settings to the default location.
    pub(crate) fn save(&self) -> Result<()> {
        self.save_to(&Self::app_dir()?.join(SETTINGS_FILE))
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents).context("Failed to write settings file")?;

        Ok(())
    }

    pub(crate) fn validate(&self) -> Validation {
        let mut validation = Validation::default();

        validate_url(&self.locality_base_url, "locality_base_url", &mut validation);
        validate_url(&self.weather_base_url, "weather_base_url", &mut validation);

        if self.request_timeout_secs == 0 {
            validation.error("request_timeout_secs", "Timeout must be greater than 0");
        } else if self.request_timeout_secs > MAX_SENSIBLE_TIMEOUT_SECS {
            validation.warning(
                "request_timeout_secs",
                format!("Timeout is unusually long (>{MAX_SENSIBLE_TIMEOUT_SECS}s)"),
            );
        }

        validation
    }
}

fn validate_url(raw: &str, field: &'static str, validation: &mut Validation) {
    match Url::parse(raw) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                validation.error(
                    field,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                validation.error(field, "URL must have a host");
            }
        }
        Err(err) => validation.error(field, format!("Invalid URL: {err}")),
    }
}
