//! Settings file for the `thermodial` binary.
//!
//! ```toml
//! [dial]
//! size = "medium"
//! temperature_scale = "C"
//!
//! [dial.theme]
//! heating = "#ff5500"
//!
//! [feed]
//! kind = "starling"
//! base_url = "http://192.168.1.20:3080/"
//! device_id = "abc123"
//! api_key = "secret"
//!
//! [output]
//! path = "dial.svg"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{DialOptions, SizePreset, TemperatureScale, ThemeSpec};
use crate::errors::{ConfigError, FeedError, FeedResult, SettingsError};
use crate::feed::{DEFAULT_API_PATH, DEFAULT_NEST_URL, DeviceFilter, FeedSource};
use crate::log::{debug, info};

pub const DEFAULT_SETTINGS_FILE: &str = "thermodial.toml";
pub const DEFAULT_OUTPUT_FILE: &str = "thermodial.svg";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dial: DialSettings,
    pub feed: FeedSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialSettings {
    pub size: SizePreset,
    pub temperature_scale: TemperatureScale,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub tick_degrees: Option<f64>,
    pub embed_style: bool,
    /// Initial name label; feeds that report a location override it
    pub name: Option<String>,
    pub theme: ThemeSpec,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            size: SizePreset::default(),
            temperature_scale: TemperatureScale::default(),
            min_value: None,
            max_value: None,
            tick_degrees: None,
            embed_style: true,
            name: None,
            theme: ThemeSpec::default(),
        }
    }
}

impl DialSettings {
    pub fn to_options(&self) -> Result<DialOptions, ConfigError> {
        let mut options = DialOptions::new()
            .size(self.size)
            .scale(self.temperature_scale)
            .embed_style(self.embed_style)
            .theme(self.theme.resolve()?);
        options.min_value = self.min_value;
        options.max_value = self.max_value;
        options.tick_degrees = self.tick_degrees;
        Ok(options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    #[default]
    Starling,
    Nest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub kind: FeedKind,
    pub base_url: Option<String>,
    pub api_path: String,
    pub device_id: Option<String>,
    pub api_key: Option<String>,
    pub nest_url: String,
    pub token: Option<String>,
    pub only_online: bool,
    pub where_filter: Option<Vec<String>>,
    pub poll_interval_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            kind: FeedKind::default(),
            base_url: None,
            api_path: DEFAULT_API_PATH.to_string(),
            device_id: None,
            api_key: None,
            nest_url: DEFAULT_NEST_URL.to_string(),
            token: None,
            only_online: false,
            where_filter: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl FeedSettings {
    /// Build the feed source, checking that the required keys are present.
    pub fn source(&self) -> FeedResult<FeedSource> {
        fn required(value: &Option<String>, name: &'static str) -> FeedResult<String> {
            value
                .clone()
                .filter(|v| !v.is_empty())
                .ok_or(FeedError::MissingSetting { name })
        }

        match self.kind {
            FeedKind::Starling => Ok(FeedSource::Starling {
                base_url: required(&self.base_url, "feed.base_url")?,
                api_path: self.api_path.clone(),
                device_id: required(&self.device_id, "feed.device_id")?,
                api_key: required(&self.api_key, "feed.api_key")?,
            }),
            FeedKind::Nest => Ok(FeedSource::Nest {
                url: self.nest_url.clone(),
                token: self.token.clone(),
                filter: DeviceFilter {
                    only_online: self.only_online,
                    where_names: self.where_filter.clone(),
                },
            }),
        }
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let settings: Settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    // Surface bad colors and ranges at load time rather than at first render
    crate::config::DialConfig::from_options(&settings.dial.to_options()?)?;
    info!("Loaded settings from {:?}", path);
    Ok(settings)
}
