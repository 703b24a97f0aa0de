//! Poll-cycle driver: the host-style short poll (current conditions) and
//! long poll (daily forecast + ETo) loops.

use crate::config::{Poll, Site};
use crate::error::AppError;
use crate::hub::NodeLink;
use crate::nodes::{controller, daily, daily_address, DriverValue, CONTROLLER_ADDRESS};
use crate::provider::WeatherClient;
use crate::uom::Driver;
use crate::FORECAST_DAYS_MAX;
use chrono::DateTime;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct Poller<L: NodeLink> {
    client: WeatherClient,
    link: Arc<L>,
    site: Site,
    poll: Poll,
    forecast_days: usize,
}

impl<L: NodeLink> Poller<L> {
    pub fn new(client: WeatherClient, link: Arc<L>, site: Site, poll: Poll) -> Self {
        let forecast_days = poll.forecast_days.clamp(1, FORECAST_DAYS_MAX);
        Self { client, link, site, poll, forecast_days }
    }

    /// Register the controller node and one daily node per forecast day.
    pub async fn register_nodes(&self) -> Result<(), AppError> {
        self.link.add_node(CONTROLLER_ADDRESS, "weather", "WeatherBit Weather").await?;
        for day in 1..=self.forecast_days {
            let address = daily_address(day);
            self.link.add_node(&address, "daily", &format!("Forecast {}", day)).await?;
        }
        self.link
            .report(CONTROLLER_ADDRESS, &DriverValue::new(Driver::Status, 1.0, self.site.units))
            .await?;
        Ok(())
    }

    /// Fetch and report current conditions. Returns the number of drivers
    /// successfully reported.
    pub async fn poll_current(&self) -> Result<usize, AppError> {
        let observation = self.client.current().await?;
        if let Some(at) = observation.ts.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
            debug!("observation taken at {at}");
        }
        let values = controller::driver_values(&observation, self.site.units);
        Ok(self.report_all(CONTROLLER_ADDRESS, &values).await)
    }

    /// Fetch the daily forecast and report every day's drivers, ETo
    /// included. Returns the number of drivers successfully reported.
    pub async fn poll_forecast(&self) -> Result<usize, AppError> {
        let forecast = self.client.forecast(self.forecast_days).await?;
        let mut sent = 0;
        for (i, fc) in forecast.data.iter().take(self.forecast_days).enumerate() {
            let address = daily_address(i + 1);
            let values = daily::driver_values(fc, &self.site, forecast.lat);
            sent += self.report_all(&address, &values).await;
        }
        Ok(sent)
    }

    /// Report a batch of driver values. A failed report is logged and
    /// counted, never fatal to the cycle.
    async fn report_all(&self, address: &str, values: &[DriverValue]) -> usize {
        let mut sent = 0;
        for value in values {
            match self.link.report(address, value).await {
                Ok(()) => sent += 1,
                Err(e) => warn!("failed to report {} on {}: {e}", value.driver.code(), address),
            }
        }
        sent
    }

    /// Run until shutdown. A failed upstream request means skip this
    /// update, nothing more.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut short = tokio::time::interval(Duration::from_secs(self.poll.short_secs));
        let mut long = tokio::time::interval(Duration::from_secs(self.poll.long_secs));
        info!(
            "polling every {}s (current) / {}s (forecast, {} days)",
            self.poll.short_secs, self.poll.long_secs, self.forecast_days
        );
        loop {
            tokio::select! {
                _ = short.tick() => {
                    if let Err(e) = self.poll_current().await {
                        warn!("current conditions poll failed: {e}");
                    }
                }
                _ = long.tick() => {
                    if let Err(e) = self.poll_forecast().await {
                        warn!("forecast poll failed: {e}");
                    }
                }
                _ = shutdown.changed() => {
                    info!("poller stopping");
                    break;
                }
            }
        }
    }
}
