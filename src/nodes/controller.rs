//! Current-conditions node: maps one provider observation onto the
//! controller's driver set. Absent fields are skipped, not zeroed.

use crate::codes::condition_index;
use crate::nodes::DriverValue;
use crate::provider::CurrentObservation;
use crate::uom::{Driver, UnitSystem};

pub fn driver_values(ob: &CurrentObservation, units: UnitSystem) -> Vec<DriverValue> {
    let fields = [
        (Driver::Temperature, ob.temp),
        (Driver::Humidity, ob.rh),
        (Driver::Pressure, ob.pres),
        (Driver::DewPoint, ob.dewpt),
        (Driver::FeelsLike, ob.app_temp),
        (Driver::WindSpeed, ob.wind_spd),
        (Driver::WindDir, ob.wind_dir),
        (Driver::Visibility, ob.vis),
        (Driver::Rain, ob.precip),
        (Driver::SolarRadiation, ob.solar_rad),
        (Driver::UvIndex, ob.uv),
        (Driver::AirQuality, ob.aqi),
        (Driver::Clouds, ob.clouds),
    ];

    let mut values: Vec<DriverValue> = fields
        .into_iter()
        .filter_map(|(driver, value)| value.map(|v| DriverValue::new(driver, v, units)))
        .collect();

    if let Some(weather) = &ob.weather {
        values.push(DriverValue::new(Driver::Conditions, condition_index(weather.code) as f64, units));
    }
    values
}
