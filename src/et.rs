//! Daily reference evapotranspiration (FAO-56 Penman-Monteith).
//!
//! The formula always runs in metric terms: degrees Celsius, meters per
//! second, meters of elevation, mm/day out. Callers on an imperial unit
//! system convert at the boundary with [`fahrenheit_to_celsius`] and
//! [`mph_to_ms`] before calling in.
//!
//! There is no input validation here. Implausible inputs (inverted
//! temperature extremes, negative day-of-year) can produce NaN or negative
//! results; callers are responsible for valid meteorological data.

use std::f64::consts::PI;

/// Solar constant, MJ m-2 min-1.
const SOLAR_CONSTANT: f64 = 0.0820;
/// Stefan-Boltzmann constant, MJ K-4 m-2 day-1.
const STEFAN_BOLTZMANN: f64 = 4.903e-9;
/// Hargreaves radiation adjustment coefficient, interior-location value.
const K_RS: f64 = 0.16;
/// Albedo of the grass reference surface.
const ALBEDO: f64 = 0.23;

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn mph_to_ms(mph: f64) -> f64 {
    mph * 0.44704
}

/// Saturation vapour pressure in kPa at air temperature `t` in Celsius.
fn saturation_vapour_pressure(t: f64) -> f64 {
    0.6108 * (17.27 * t / (t + 237.3)).exp()
}

/// Daily reference evapotranspiration in mm/day, scaled by `plant_coeff`.
///
/// `t_mean` falls back to `(t_max + t_min) / 2` when `None`. `rh_max` and
/// `rh_min` are independent inputs per the standard weighted-humidity
/// formula; a caller with only a single daily humidity reading passes it for
/// both. Wind speed is taken at the standard 2 m reference height. Solar
/// radiation is estimated from the daily temperature range since the
/// forecast data carries no radiation field.
#[allow(clippy::too_many_arguments)]
pub fn evapotranspiration(
    t_max: f64, t_min: f64, t_mean: Option<f64>, wind_speed: f64, elevation: f64, rh_max: f64,
    rh_min: f64, latitude: f64, plant_coeff: f64, day_of_year: u32,
) -> f64 {
    let t_mean = t_mean.unwrap_or((t_max + t_min) / 2.0);

    // Vapour pressure terms.
    let es = (saturation_vapour_pressure(t_max) + saturation_vapour_pressure(t_min)) / 2.0;
    let ea = (saturation_vapour_pressure(t_min) * rh_max / 100.0
        + saturation_vapour_pressure(t_max) * rh_min / 100.0)
        / 2.0;

    // Slope of the saturation vapour pressure curve at mean temperature.
    let delta = 4098.0 * saturation_vapour_pressure(t_mean) / (t_mean + 237.3).powi(2);

    // Barometric pressure at site elevation, then the psychrometric constant.
    let pressure = 101.3 * ((293.0 - 0.0065 * elevation) / 293.0).powf(5.26);
    let gamma = 0.000665 * pressure;

    // Extraterrestrial radiation from solar geometry.
    let b = 2.0 * PI * day_of_year as f64 / 365.0;
    let inv_distance = 1.0 + 0.033 * b.cos();
    let declination = 0.409 * (b - 1.39).sin();
    let phi = latitude.to_radians();
    // Beyond the polar circles the acos argument leaves [-1, 1]; clamping
    // pins the sunset angle to 0 (polar night) or PI (midnight sun).
    let sunset_angle = (-phi.tan() * declination.tan()).clamp(-1.0, 1.0).acos();
    let ra = 24.0 * 60.0 / PI
        * SOLAR_CONSTANT
        * inv_distance
        * (sunset_angle * phi.sin() * declination.sin()
            + phi.cos() * declination.cos() * sunset_angle.sin());

    // Solar radiation from the temperature range, clear-sky radiation from
    // elevation. The cloudiness ratio Rs/Rso is capped at 1 and taken as 0
    // through the polar night, where Ra is zero.
    let rs = K_RS * (t_max - t_min).sqrt() * ra;
    let rso = (0.75 + 2e-5 * elevation) * ra;
    let cloud_ratio = if rso > 0.0 { (rs / rso).min(1.0) } else { 0.0 };

    // Net radiation: shortwave less longwave.
    let rns = (1.0 - ALBEDO) * rs;
    let mean_t4 = ((t_max + 273.16).powi(4) + (t_min + 273.16).powi(4)) / 2.0;
    let rnl =
        STEFAN_BOLTZMANN * mean_t4 * (0.34 - 0.14 * ea.sqrt()) * (1.35 * cloud_ratio - 0.35);
    let rn = rns - rnl;

    // Combination equation. Soil heat flux is zero at the daily timestep.
    let radiation_term = 0.408 * delta * rn;
    let wind_term = gamma * 900.0 / (t_mean + 273.0) * wind_speed * (es - ea);
    let eto = (radiation_term + wind_term) / (delta + gamma * (1.0 + 0.34 * wind_speed));

    eto * plant_coeff
}
