pub mod controller;
pub mod daily;

use crate::uom::{Driver, UnitSystem};
use crate::utils::round;

pub const CONTROLLER_ADDRESS: &str = "weather";

pub fn daily_address(day: usize) -> String {
    format!("forecast_{}", day)
}

/// One driver update as the hub receives it. Values carry three decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverValue {
    pub driver: Driver,
    pub value: f64,
    pub uom: u8,
}

impl DriverValue {
    pub fn new(driver: Driver, value: f64, units: UnitSystem) -> Self {
        Self { driver, value: round(value, 3), uom: driver.uom(units) }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn addresses() {
        assert_eq!(daily_address(1), "forecast_1");
        assert_eq!(daily_address(13), "forecast_13");
    }

    #[test]
    fn values_are_rounded_and_tagged() {
        let v = DriverValue::new(Driver::Temperature, 21.5678, UnitSystem::Metric);
        assert_eq!(v.value, 21.568);
        assert_eq!(v.uom, 4);
    }
}
