mod common;

use common::RecordingLink;
use std::sync::Arc;
use wbnode::config::{Poll, Provider, Site};
use wbnode::hub::NodeLink;
use wbnode::nodes::{daily, daily_address};
use wbnode::poller::Poller;
use wbnode::provider::{ForecastResponse, WeatherClient};
use wbnode::uom::{Driver, UnitSystem};

const FORECAST_BODY: &str = include_str!("data/forecast.json");

fn boulder_site() -> Site {
    Site { elevation: 1600.0, plant_type: 0.23, units: UnitSystem::Metric }
}

#[test]
fn parses_a_full_provider_response() {
    let forecast: ForecastResponse = serde_json::from_str(FORECAST_BODY).unwrap();
    assert_eq!(forecast.city_name, "Boulder");
    assert_eq!(forecast.lat, 40.01);
    assert_eq!(forecast.data.len(), 3);

    let day = &forecast.data[0];
    assert_eq!(day.max_temp, 25.0);
    assert_eq!(day.min_temp, 15.0);
    assert_eq!(day.rh, Some(60.0));
    assert_eq!(day.weather.as_ref().unwrap().code, 802);
}

#[test]
fn every_forecast_day_yields_an_eto_driver() {
    let forecast: ForecastResponse = serde_json::from_str(FORECAST_BODY).unwrap();
    let site = boulder_site();

    for day in &forecast.data {
        let values = daily::driver_values(day, &site, forecast.lat);
        let eto = values
            .iter()
            .find(|v| v.driver == Driver::Eto)
            .unwrap_or_else(|| panic!("no ETo for day {}", day.ts));
        assert_eq!(eto.uom, 106);
        assert!(eto.value.is_finite() && eto.value >= 0.0);
    }
}

#[test]
fn thunderstorm_day_maps_conditions_and_rain() {
    let forecast: ForecastResponse = serde_json::from_str(FORECAST_BODY).unwrap();
    let values = daily::driver_values(&forecast.data[2], &boulder_site(), forecast.lat);

    let conditions = values.iter().find(|v| v.driver == Driver::Conditions).unwrap();
    assert_eq!(conditions.value, 21.0);

    let rain = values.iter().find(|v| v.driver == Driver::Rain).unwrap();
    assert_eq!(rain.value, 6.4);
    assert_eq!(rain.uom, 82);

    let pop = values.iter().find(|v| v.driver == Driver::Pop).unwrap();
    assert_eq!(pop.value, 70.0);
}

#[test]
fn drier_windier_day_evaporates_more() {
    // Day 2 is hotter, drier and windier than day 1; its ETo must be higher.
    let forecast: ForecastResponse = serde_json::from_str(FORECAST_BODY).unwrap();
    let site = boulder_site();
    let first = daily::daily_eto(&forecast.data[0], &site, forecast.lat).unwrap();
    let second = daily::daily_eto(&forecast.data[1], &site, forecast.lat).unwrap();
    assert!(second > first, "expected {second} > {first}");
}

#[tokio::test]
async fn node_registration_reaches_the_hub() {
    let link = Arc::new(RecordingLink::default());
    let client = WeatherClient::new(&Provider::default(), UnitSystem::Metric);
    let poll = Poll { forecast_days: 3, ..Default::default() };
    let poller = Poller::new(client, link.clone(), boulder_site(), poll);

    poller.register_nodes().await.unwrap();

    let nodes = link.nodes.lock().unwrap();
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0], ("weather".to_owned(), "weather".to_owned(), "WeatherBit Weather".to_owned()));
    assert_eq!(nodes[1].0, daily_address(1));
    assert_eq!(nodes[3].0, daily_address(3));

    // status driver goes up with registration
    let reports = link.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "weather");
    assert_eq!(reports[0].1.driver, Driver::Status);
    assert_eq!(reports[0].1.value, 1.0);
}

#[tokio::test]
async fn forecast_cycle_reports_all_days() {
    let forecast: ForecastResponse = serde_json::from_str(FORECAST_BODY).unwrap();
    let link = RecordingLink::default();
    let site = boulder_site();

    for (i, day) in forecast.data.iter().enumerate() {
        let address = daily_address(i + 1);
        for value in daily::driver_values(day, &site, forecast.lat) {
            link.report(&address, &value).await.unwrap();
        }
    }

    let reports = link.reports.lock().unwrap();
    let eto_reports: Vec<_> =
        reports.iter().filter(|(_, v)| v.driver == Driver::Eto).collect();
    assert_eq!(eto_reports.len(), 3);
    for (i, (address, _)) in eto_reports.iter().enumerate() {
        assert_eq!(*address, daily_address(i + 1));
    }
}
