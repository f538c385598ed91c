//! NTC thermistor temperature decoding.
//!
//! The conversion-complete ISR feeds every 10-bit sample into an
//! exponential moving average (weight 1/16).  Readers convert the averaged
//! value to tenths of a degree on demand by binary-searching the
//! calibration table and interpolating between neighbouring whole degrees.
//! Nothing is cached: the temperature always reflects the latest average.

use crate::config::ADC_AVERAGING_BITS;
use crate::pins::ADC_MAX;

use super::calibration::{CalibrationTable, NTC_TABLE};

/// Point-in-time view of the decoder for the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureReading {
    /// Last raw conversion result.
    pub raw: u16,
    /// Moving average with the fractional bits removed.
    pub averaged: u16,
    /// Calibrated temperature in tenths of a degree, correction applied.
    pub tenths: i16,
}

#[derive(Debug)]
pub struct TemperatureDecoder {
    table: &'static CalibrationTable,
    last_raw: u16,
    /// Average scaled up by `2^ADC_AVERAGING_BITS`.
    accumulator: u32,
    seeded: bool,
}

impl TemperatureDecoder {
    /// Decoder over the board's thermistor table.
    pub const fn new() -> Self {
        Self::with_table(&NTC_TABLE)
    }

    pub const fn with_table(table: &'static CalibrationTable) -> Self {
        Self {
            table,
            last_raw: 0,
            accumulator: 0,
            seeded: false,
        }
    }

    /// Fold one conversion result into the average.  Called only from the
    /// sampling ISR.
    ///
    /// The first sample seeds the accumulator directly so the reading does
    /// not ramp up from zero after boot.
    pub fn accumulate(&mut self, raw_sample: u16) {
        let raw = raw_sample & ADC_MAX;
        self.last_raw = raw;
        if self.seeded {
            let decay = self.accumulator >> ADC_AVERAGING_BITS;
            self.accumulator = self.accumulator - decay + u32::from(raw);
        } else {
            self.accumulator = u32::from(raw) << ADC_AVERAGING_BITS;
            self.seeded = true;
        }
    }

    /// True once at least one sample has been accumulated.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    /// The de-biased moving average.
    pub fn averaged_value(&self) -> u16 {
        (self.accumulator >> ADC_AVERAGING_BITS) as u16
    }

    /// Calibrated temperature of the current average, in tenths, with
    /// `correction_tenths` added.
    pub fn decode_temperature(&self, correction_tenths: i16) -> i16 {
        decode(self.table, self.averaged_value(), correction_tenths)
    }

    pub fn reading(&self, correction_tenths: i16) -> TemperatureReading {
        TemperatureReading {
            raw: self.last_raw,
            averaged: self.averaged_value(),
            tenths: self.decode_temperature(correction_tenths),
        }
    }
}

impl Default for TemperatureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an averaged ADC value to tenths of a degree.
///
/// Narrows `[left, right)` until the entries are adjacent, with
/// `table[left] >= value > table[right]`.  At or above the `left` entry the
/// result is that whole degree; otherwise it is interpolated towards
/// `right`.  Values colder than the first entry clamp to it; values hotter
/// than the last entry clamp to the last.  The corrected result saturates
/// at the `i16` range.
///
/// The table must be non-empty and strictly decreasing; that is a
/// configuration-time precondition, not a checked error.
pub fn decode(table: &CalibrationTable, value: u16, correction_tenths: i16) -> i16 {
    let raw = table.as_slice();
    let mut left = 0usize;
    let mut right = raw.len();

    while right - left > 1 {
        let mid = (left + right) >> 1;
        if value > raw[mid] {
            right = mid;
        } else {
            left = mid;
        }
    }

    let offset = if value >= raw[left] || right == raw.len() {
        left as i32 * 10
    } else {
        let upper = i32::from(raw[left]);
        let lower = i32::from(raw[right]);
        right as i32 * 10 - (i32::from(value) - lower) * 10 / (upper - lower)
    };

    let tenths = i32::from(table.base_tenths()) + offset + i32::from(correction_tenths);
    i16::try_from(tenths).unwrap_or(if tenths < 0 { i16::MIN } else { i16::MAX })
}
