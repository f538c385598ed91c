//! Sensor subsystem: the NTC calibration table and the temperature decoder
//! fed by the ADC conversion-complete interrupt.

pub mod calibration;
pub mod temperature;

pub use calibration::{CalibrationTable, NTC_TABLE};
pub use temperature::{TemperatureDecoder, TemperatureReading};
