//! NTC calibration table (10 kOhm NTC in a divider, 10-bit ADC).
//!
//! One raw ADC threshold per whole degree from -52 C to +112 C.  The NTC
//! resistance falls with temperature, so raw values fall with the index:
//! the decoder's binary search depends on the table being strictly
//! decreasing, and the interpolation divides by the difference of
//! neighbouring entries.

/// Raw ADC values, index 0 = -52 C, index 164 = +112 C.
const NTC_RAW: [u16; 165] = [
    974, 971, 967, 964, 960, 956, 953, 948, 944, 940, //
    935, 930, 925, 920, 914, 909, 903, 897, 891, 884, //
    877, 871, 864, 856, 849, 841, 833, 825, 817, 809, //
    800, 791, 782, 773, 764, 754, 745, 735, 725, 715, //
    705, 695, 685, 675, 664, 654, 644, 633, 623, 612, //
    601, 591, 580, 570, 559, 549, 538, 528, 518, 507, //
    497, 487, 477, 467, 457, 448, 438, 429, 419, 410, //
    401, 392, 383, 375, 366, 358, 349, 341, 333, 326, //
    318, 310, 303, 296, 289, 282, 275, 269, 262, 256, //
    250, 244, 238, 232, 226, 221, 215, 210, 205, 200, //
    195, 191, 186, 181, 177, 173, 169, 165, 161, 157, //
    153, 149, 146, 142, 139, 136, 132, 129, 126, 123, //
    120, 117, 115, 112, 109, 107, 104, 102, 100, 97, //
    95, 93, 91, 89, 87, 85, 83, 81, 79, 78, //
    76, 74, 73, 71, 69, 68, 67, 65, 64, 62, //
    61, 60, 58, 57, 56, 55, 54, 53, 52, 51, //
    49, 48, 47, 46, 45,
];

/// Temperature of index 0, in tenths of a degree.
const NTC_BASE_TENTHS: i16 = -520;

/// The board's thermistor table.
pub static NTC_TABLE: CalibrationTable = CalibrationTable::new(&NTC_RAW, NTC_BASE_TENTHS);

/// Ordered raw-ADC thresholds, one per whole degree, starting at a base
/// temperature.  Process-wide constant.
#[derive(Debug)]
pub struct CalibrationTable {
    raw: &'static [u16],
    base_tenths: i16,
}

impl CalibrationTable {
    /// `raw` must be strictly decreasing and non-empty.  This is not
    /// checked here (const context); see [`is_strictly_decreasing`].
    ///
    /// [`is_strictly_decreasing`]: Self::is_strictly_decreasing
    pub const fn new(raw: &'static [u16], base_tenths: i16) -> Self {
        Self { raw, base_tenths }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Raw ADC threshold for whole-degree step `index`.
    pub fn raw_at(&self, index: usize) -> u16 {
        self.raw[index]
    }

    /// Temperature of index 0, in tenths.
    pub fn base_tenths(&self) -> i16 {
        self.base_tenths
    }

    /// Temperature of step `index`, in tenths, without correction.
    pub fn tenths_at(&self, index: usize) -> i16 {
        self.base_tenths + (index as i16) * 10
    }

    /// Raw values as a slice.
    pub fn as_slice(&self) -> &'static [u16] {
        self.raw
    }

    pub fn is_strictly_decreasing(&self) -> bool {
        self.raw.windows(2).all(|w| w[0] > w[1])
    }
}
