//! Daily forecast node: maps one forecast day onto its driver set and
//! derives the ETo driver from the day's weather.

use crate::codes::condition_index;
use crate::config::Site;
use crate::et;
use crate::nodes::DriverValue;
use crate::provider::DailyForecast;
use crate::uom::Driver;
use crate::utils::{day_of_week, day_of_year, round};
use tracing::{debug, info};

pub fn driver_values(fc: &DailyForecast, site: &Site, latitude: f64) -> Vec<DriverValue> {
    let units = site.units;
    let mut values = Vec::new();

    if let Some(dow) = day_of_week(fc.ts) {
        values.push(DriverValue::new(Driver::DayOfWeek, dow as f64, units));
    }
    values.push(DriverValue::new(Driver::MaxTemp, fc.max_temp, units));
    values.push(DriverValue::new(Driver::MinTemp, fc.min_temp, units));

    let fields = [
        (Driver::Humidity, fc.rh),
        (Driver::Pressure, fc.pres),
        (Driver::DewPoint, fc.dewpt),
        (Driver::Clouds, fc.clouds),
        (Driver::WindSpeed, fc.wind_spd),
        (Driver::GustSpeed, fc.wind_gust_spd),
        (Driver::WindDir, fc.wind_dir),
        (Driver::Rain, fc.precip),
        (Driver::Snow, fc.snow),
        (Driver::SnowDepth, fc.snow_depth),
        (Driver::Pop, fc.pop),
        (Driver::UvIndex, fc.uv),
        (Driver::Ozone, fc.ozone),
        (Driver::Visibility, fc.vis),
        (Driver::MoonPhase, fc.moon_phase),
    ];
    values.extend(
        fields
            .into_iter()
            .filter_map(|(driver, value)| value.map(|v| DriverValue::new(driver, v, units))),
    );

    if let Some(weather) = &fc.weather {
        values.push(DriverValue::new(Driver::Conditions, condition_index(weather.code) as f64, units));
    }

    if let Some(eto) = daily_eto(fc, site, latitude) {
        info!("ETo = {:.2} mm/day", eto);
        values.push(DriverValue::new(Driver::Eto, round(eto, 2), units));
    } else {
        debug!("forecast day {} lacks the fields needed for ETo", fc.ts);
    }

    values
}

/// ETo for one forecast day. Temperatures and wind speed are converted to
/// metric at this boundary when the unit system is imperial; the engine
/// itself always runs metric. The provider supplies a single daily humidity
/// reading, which is passed as both the max and min humidity bound.
pub fn daily_eto(fc: &DailyForecast, site: &Site, latitude: f64) -> Option<f64> {
    let rh = fc.rh?;
    let wind_spd = fc.wind_spd?;
    let day_of_year = day_of_year(fc.ts)?;

    let (t_max, t_min, wind) = if site.units.is_imperial() {
        (
            et::fahrenheit_to_celsius(fc.max_temp),
            et::fahrenheit_to_celsius(fc.min_temp),
            et::mph_to_ms(wind_spd),
        )
    } else {
        (fc.max_temp, fc.min_temp, wind_spd)
    };

    Some(et::evapotranspiration(
        t_max,
        t_min,
        None,
        wind,
        site.elevation,
        rh,
        rh,
        latitude,
        site.plant_type,
        day_of_year,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::provider::ConditionCode;
    use crate::uom::UnitSystem;
    use chrono::{TimeZone, Utc};

    fn forecast_day(ts: i64) -> DailyForecast {
        DailyForecast {
            ts,
            max_temp: 25.0,
            min_temp: 15.0,
            rh: Some(60.0),
            pres: Some(1003.0),
            dewpt: Some(11.8),
            clouds: Some(40.0),
            wind_spd: Some(2.0),
            wind_gust_spd: Some(4.5),
            wind_dir: Some(270.0),
            precip: Some(0.0),
            snow: None,
            snow_depth: None,
            pop: Some(10.0),
            uv: Some(7.1),
            ozone: Some(310.0),
            vis: Some(24.0),
            moon_phase: Some(0.42),
            weather: Some(ConditionCode { code: 802, description: String::new() }),
        }
    }

    fn site(units: UnitSystem) -> Site {
        Site { elevation: 100.0, plant_type: 0.23, units }
    }

    #[test]
    fn eto_matches_engine_for_metric_inputs() {
        // 2024-06-30 12:00 UTC, day 182.
        let ts = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap().timestamp();
        let fc = forecast_day(ts);
        let eto = daily_eto(&fc, &site(UnitSystem::Metric), 40.0).unwrap();
        let expected =
            et::evapotranspiration(25.0, 15.0, None, 2.0, 100.0, 60.0, 60.0, 40.0, 0.23, 182);
        assert_eq!(eto, expected);
    }

    #[test]
    fn imperial_forecast_matches_metric_forecast() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap().timestamp();
        let metric = daily_eto(&forecast_day(ts), &site(UnitSystem::Metric), 40.0).unwrap();

        let mut imperial_fc = forecast_day(ts);
        imperial_fc.max_temp = 77.0;
        imperial_fc.min_temp = 59.0;
        imperial_fc.wind_spd = Some(2.0 / 0.44704);
        let imperial = daily_eto(&imperial_fc, &site(UnitSystem::Imperial), 40.0).unwrap();

        assert!((metric - imperial).abs() < 1e-9);
    }

    #[test]
    fn eto_needs_humidity_and_wind() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap().timestamp();
        let mut fc = forecast_day(ts);
        fc.rh = None;
        assert!(daily_eto(&fc, &site(UnitSystem::Metric), 40.0).is_none());

        let mut fc = forecast_day(ts);
        fc.wind_spd = None;
        assert!(daily_eto(&fc, &site(UnitSystem::Metric), 40.0).is_none());
    }

    #[test]
    fn full_driver_set_for_a_forecast_day() {
        // 2024-06-30 is a Sunday.
        let ts = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap().timestamp();
        let values = driver_values(&forecast_day(ts), &site(UnitSystem::Metric), 40.0);

        let dow = values.iter().find(|v| v.driver == Driver::DayOfWeek).unwrap();
        assert_eq!(dow.value, 0.0);

        let conditions = values.iter().find(|v| v.driver == Driver::Conditions).unwrap();
        assert_eq!(conditions.value, 31.0);

        let eto = values.iter().find(|v| v.driver == Driver::Eto).unwrap();
        assert_eq!(eto.uom, 106);
        assert!(eto.value > 0.9 && eto.value < 1.1, "eto = {}", eto.value);

        // snow fields were absent and must not be reported
        assert!(!values.iter().any(|v| v.driver == Driver::Snow));
        assert!(!values.iter().any(|v| v.driver == Driver::SnowDepth));
    }
}
