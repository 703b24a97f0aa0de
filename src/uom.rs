//! Driver names and unit-of-measure codes for the hub.
//!
//! The hub renders every reported value through a numeric UOM code. The
//! table is a pure function of driver and unit system; there is no mutable
//! per-node UOM state.

use serde::Deserialize;

/// Active display unit system. Governs the provider query code, the UOM
/// table column, and whether temperature/wind need conversion before the
/// ETo computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Uk,
    Imperial,
}

impl UnitSystem {
    /// Units code for the provider query string. The uk variant is metric
    /// data with a different display rendering.
    pub fn api_code(&self) -> &'static str {
        match self {
            UnitSystem::Metric | UnitSystem::Uk => "M",
            UnitSystem::Imperial => "I",
        }
    }

    /// True when provider values arrive in Fahrenheit / mph.
    pub fn is_imperial(&self) -> bool {
        matches!(self, UnitSystem::Imperial)
    }
}

/// Every driver value this node server reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    Status,
    Temperature,
    MaxTemp,
    MinTemp,
    FeelsLike,
    Humidity,
    DewPoint,
    Pressure,
    WindDir,
    WindSpeed,
    GustSpeed,
    Rain,
    Snow,
    SnowDepth,
    Pop,
    UvIndex,
    Ozone,
    Visibility,
    MoonPhase,
    Clouds,
    Conditions,
    AirQuality,
    SolarRadiation,
    DayOfWeek,
    Eto,
}

impl Driver {
    /// Wire name the hub knows this driver by.
    pub fn code(&self) -> &'static str {
        match self {
            Driver::Status => "ST",
            Driver::Temperature => "CLITEMP",
            Driver::Humidity => "CLIHUM",
            Driver::Pressure => "BARPRES",
            Driver::WindDir => "WINDDIR",
            Driver::DewPoint => "DEWPT",
            Driver::SolarRadiation => "SOLRAD",
            Driver::MaxTemp => "GV0",
            Driver::MinTemp => "GV1",
            Driver::FeelsLike => "GV2",
            Driver::WindSpeed => "GV4",
            Driver::GustSpeed => "GV5",
            Driver::Rain => "GV6",
            Driver::Snow => "GV7",
            Driver::SnowDepth => "GV8",
            Driver::MoonPhase => "GV9",
            Driver::Ozone => "GV10",
            Driver::Conditions => "GV13",
            Driver::Clouds => "GV14",
            Driver::Visibility => "GV15",
            Driver::UvIndex => "GV16",
            Driver::AirQuality => "GV17",
            Driver::Pop => "GV18",
            Driver::DayOfWeek => "GV19",
            Driver::Eto => "GV20",
        }
    }

    /// UOM code for this driver under the given unit system.
    pub fn uom(&self, units: UnitSystem) -> u8 {
        use Driver::*;
        use UnitSystem::*;
        match (self, units) {
            (Status, _) => 2,
            (Temperature | MaxTemp | MinTemp | FeelsLike | DewPoint, Metric | Uk) => 4,
            (Temperature | MaxTemp | MinTemp | FeelsLike | DewPoint, Imperial) => 17,
            (Humidity | Clouds | Pop, _) => 22,
            (Pressure, _) => 117,
            (WindDir, _) => 76,
            (WindSpeed | GustSpeed, Metric) => 49,
            (WindSpeed | GustSpeed, Uk | Imperial) => 48,
            (Rain | Snow | SnowDepth, Metric | Uk) => 82,
            (Rain | Snow | SnowDepth, Imperial) => 105,
            (MoonPhase | Ozone | AirQuality, _) => 56,
            (Conditions | DayOfWeek, _) => 25,
            (Visibility, Metric) => 83,
            (Visibility, Uk | Imperial) => 116,
            (UvIndex, _) => 71,
            (SolarRadiation, _) => 74,
            // ETo is reported in mm/day in every unit system.
            (Eto, _) => 106,
        }
    }
}
