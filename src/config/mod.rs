pub mod run_options;

use crate::error::AppError;
use crate::uom::UnitSystem;
use run_options::Args;
use serde::Deserialize;
use std::fs;

pub const CONFIG_FILE: &str = "./wbnode.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub api_key: String,
    /// Location query literal: a postal code, a `city=Name,ST` pair, or a
    /// raw query-string fragment.
    pub location: String,
    pub language: String,
    pub base_url: String,
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            location: String::new(),
            language: "en".to_owned(),
            base_url: crate::provider::DEFAULT_BASE_URL.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Site {
    /// Meters above sea level.
    pub elevation: f64,
    /// Crop coefficient applied to the computed ETo.
    pub plant_type: f64,
    pub units: UnitSystem,
}

impl Default for Site {
    fn default() -> Self {
        Self { elevation: 0.0, plant_type: 0.23, units: UnitSystem::Metric }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Poll {
    pub short_secs: u64,
    pub long_secs: u64,
    pub forecast_days: usize,
}

impl Default for Poll {
    fn default() -> Self {
        Self { short_secs: 60, long_secs: 600, forecast_days: 7 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Hub {
    pub address: String,
    pub port: u16,
    pub client_id: String,
    pub topic_root: String,
}

impl Default for Hub {
    fn default() -> Self {
        Self {
            address: "localhost".to_owned(),
            port: 1883,
            client_id: "wbnode".to_owned(),
            topic_root: "ns/weather".to_owned(),
        }
    }
}

/// A configuration problem surfaced to the hub's notice area.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub key: String,
    pub text: String,
}

impl Notice {
    fn new(key: &str, text: &str) -> Self {
        Self { key: key.to_owned(), text: text.to_owned() }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: Provider,
    pub site: Site,
    pub poll: Poll,
    pub hub: Hub,
}

impl Config {
    pub fn load(args: Args) -> Result<Self, AppError> {
        let config_content = fs::read_to_string(&args.cfg_file)
            .map_err(|e| AppError::ConfigError(format!("{}: {e}", args.cfg_file.display())))?;
        Self::load_from_str(&config_content)
    }

    // test helper
    pub fn load_from_str(config_str: &str) -> Result<Self, AppError> {
        toml::from_str(config_str).map_err(|e| AppError::ConfigError(e.to_string()))
    }

    /// Check the required parameters. Each problem becomes a notice for the
    /// hub; an empty result means the node server is fully configured.
    pub fn validate(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if self.provider.api_key.is_empty() {
            notices.push(Notice::new("apikey", "WeatherBit API key must be set"));
        }
        if self.provider.location.is_empty() {
            notices.push(Notice::new("location", "Location parameter must be set"));
        }
        if self.site.elevation < 0.0 {
            notices.push(Notice::new("elevation", "Elevation must be zero or more meters"));
        }
        if self.site.plant_type <= 0.0 || self.site.plant_type > 1.0 {
            notices.push(Notice::new("plant_type", "Plant type coefficient must be in (0, 1]"));
        }
        notices
    }
}
