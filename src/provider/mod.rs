//! WeatherBit v2.0 HTTP client and response models.
//!
//! One best-effort request per poll cycle; a failed request or a malformed
//! body surfaces as an [`AppError`] and the caller skips that update.
//! Fields the provider omits deserialize to `None` and the mapping layer
//! skips the corresponding drivers.

use crate::config;
use crate::error::AppError;
use crate::uom::UnitSystem;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherbit.io/v2.0";

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionCode {
    pub code: u16,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentObservation {
    pub ts: Option<i64>,
    pub temp: Option<f64>,
    pub app_temp: Option<f64>,
    pub rh: Option<f64>,
    pub dewpt: Option<f64>,
    pub pres: Option<f64>,
    pub wind_spd: Option<f64>,
    pub wind_dir: Option<f64>,
    pub vis: Option<f64>,
    pub precip: Option<f64>,
    pub solar_rad: Option<f64>,
    pub uv: Option<f64>,
    pub aqi: Option<f64>,
    pub clouds: Option<f64>,
    pub weather: Option<ConditionCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub ts: i64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub rh: Option<f64>,
    pub pres: Option<f64>,
    pub dewpt: Option<f64>,
    pub clouds: Option<f64>,
    pub wind_spd: Option<f64>,
    pub wind_gust_spd: Option<f64>,
    pub wind_dir: Option<f64>,
    pub precip: Option<f64>,
    pub snow: Option<f64>,
    pub snow_depth: Option<f64>,
    pub pop: Option<f64>,
    pub uv: Option<f64>,
    pub ozone: Option<f64>,
    pub vis: Option<f64>,
    pub moon_phase: Option<f64>,
    pub weather: Option<ConditionCode>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub data: Vec<CurrentObservation>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub city_name: String,
    pub data: Vec<DailyForecast>,
}

pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    location: String,
    language: String,
    units: UnitSystem,
}

impl WeatherClient {
    pub fn new(cfg: &config::Provider, units: UnitSystem) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            location: cfg.location.clone(),
            language: cfg.language.clone(),
            units,
        }
    }

    /// A bare number is treated as a postal code for backwards
    /// compatibility; anything with `=` is passed through as-is; everything
    /// else is a city name.
    fn location_query(&self) -> String {
        if self.location.chars().all(|c| c.is_ascii_digit()) {
            format!("postal_code={}", self.location)
        } else if self.location.contains('=') {
            self.location.clone()
        } else {
            format!("city={}", self.location)
        }
    }

    fn request_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}?{}&lang={}&units={}",
            self.base_url,
            endpoint,
            self.location_query(),
            self.language,
            self.units.api_code()
        )
    }

    pub async fn current(&self) -> Result<CurrentObservation, AppError> {
        let url = self.request_url("current");
        debug!("request = {}", url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body: CurrentResponse = response.json().await?;
        body.data
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ProviderError("no observation in current response".to_owned()))
    }

    pub async fn forecast(&self, days: usize) -> Result<ForecastResponse, AppError> {
        let url = format!("{}&days={}", self.request_url("forecast/daily"), days);
        debug!("request = {}", url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body: ForecastResponse = response.json().await?;
        if body.data.is_empty() {
            return Err(AppError::ProviderError("no days in forecast response".to_owned()));
        }
        Ok(body)
    }
}
