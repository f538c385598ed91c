//! User parameters and their EEPROM-backed store.
//!
//! Parameters are shown as `P0`..`P6` in the SelectParam menu and edited
//! one step at a time in ChangeParam.  Every value is an `i16` with a
//! fixed range; temperatures are in tenths of a degree.
//!
//! | Id | Parameter             | Unit   | Range         | Default |
//! |----|-----------------------|--------|---------------|---------|
//! | P0 | Threshold             | 0.1 C  | -500 ..= 1100 | 420     |
//! | P1 | Hysteresis            | 0.1 C  | 1 ..= 150     | 20      |
//! | P2 | MaxTemperature        | 0.1 C  | -450 ..= 1100 | 1100    |
//! | P3 | MinTemperature        | 0.1 C  | -500 ..= 1050 | -500    |
//! | P4 | TemperatureCorrection | 0.1 C  | -70 ..= 70    | 0       |
//! | P5 | OverheatIndication    | on/off | 0 ..= 1       | 0       |
//! | P6 | FermentationTime      | hours  | 1 ..= 48      | 8       |
//!
//! The store persists a postcard blob `{ magic, version, values }`.  A
//! blob that is missing or unusable is replaced by defaults at load.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::{ParamPort, StoragePort};
use crate::error::{ParamError, Result};

/// Parameter slot, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ParamId {
    Threshold = 0,
    Hysteresis = 1,
    MaxTemperature = 2,
    MinTemperature = 3,
    TemperatureCorrection = 4,
    OverheatIndication = 5,
    FermentationTime = 6,
}

impl ParamId {
    pub const COUNT: usize = 7;

    pub const ALL: [ParamId; Self::COUNT] = [
        Self::Threshold,
        Self::Hysteresis,
        Self::MaxTemperature,
        Self::MinTemperature,
        Self::TemperatureCorrection,
        Self::OverheatIndication,
        Self::FermentationTime,
    ];

    /// Slot selected when entering the menu and after it times out.
    pub const FIRST: ParamId = Self::Threshold;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Next slot, staying on the last one.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(self)
    }

    /// Previous slot, staying on the first one.
    pub fn prev(self) -> Self {
        match self.index().checked_sub(1) {
            Some(idx) => Self::ALL[idx],
            None => self,
        }
    }

    pub const fn limits(self) -> ParamLimits {
        match self {
            Self::Threshold => ParamLimits::new(-500, 1100, 420),
            Self::Hysteresis => ParamLimits::new(1, 150, 20),
            Self::MaxTemperature => ParamLimits::new(-450, 1100, 1100),
            Self::MinTemperature => ParamLimits::new(-500, 1050, -500),
            Self::TemperatureCorrection => ParamLimits::new(-70, 70, 0),
            Self::OverheatIndication => ParamLimits::new(0, 1, 0),
            Self::FermentationTime => ParamLimits::new(1, 48, 8),
        }
    }
}

/// Range and factory default of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLimits {
    pub min: i16,
    pub max: i16,
    pub default: i16,
}

impl ParamLimits {
    const fn new(min: i16, max: i16, default: i16) -> Self {
        Self { min, max, default }
    }

    pub fn clamp(&self, value: i16) -> i16 {
        value.clamp(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Value table
// ---------------------------------------------------------------------------

/// One value per [`ParamId`], always within limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSet {
    values: [i16; ParamId::COUNT],
}

impl ParamSet {
    pub fn defaults() -> Self {
        let mut values = [0; ParamId::COUNT];
        for id in ParamId::ALL {
            values[id.index()] = id.limits().default;
        }
        Self { values }
    }

    pub fn get(&self, id: ParamId) -> i16 {
        self.values[id.index()]
    }

    /// Store `value`, clamped into the parameter's range.
    pub fn set(&mut self, id: ParamId, value: i16) {
        self.values[id.index()] = id.limits().clamp(value);
    }

    /// Add `delta`, clamped into the parameter's range.
    pub fn step(&mut self, id: ParamId, delta: i16) {
        self.set(id, self.get(id).saturating_add(delta));
    }

    /// Copy with every value forced into range.
    fn clamped(mut self) -> Self {
        for id in ParamId::ALL {
            self.set(id, self.get(id));
        }
        self
    }
}

/// Reading outside the `MinTemperature..=MaxTemperature` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureAlarm {
    TooCold,
    TooHot,
}

impl ParamSet {
    /// Alarm for `temperature` (tenths), if `OverheatIndication` is on.
    pub fn temperature_alarm(&self, temperature: i16) -> Option<TemperatureAlarm> {
        if self.get(ParamId::OverheatIndication) == 0 {
            return None;
        }
        if temperature < self.get(ParamId::MinTemperature) {
            Some(TemperatureAlarm::TooCold)
        } else if temperature > self.get(ParamId::MaxTemperature) {
            Some(TemperatureAlarm::TooHot)
        } else {
            None
        }
    }
}

impl Default for ParamSet {
    fn default() -> Self {
        Self::defaults()
    }
}

// ---------------------------------------------------------------------------
// Persistent store
// ---------------------------------------------------------------------------

const PARAMS_MAGIC: u16 = 0xF3A7;
const PARAMS_VERSION: u8 = 1;

/// Upper bound of an encoded blob (varint header + 7 zigzag `i16`s).
pub const PARAM_BLOB_LEN: usize = 32;

#[derive(Serialize, Deserialize)]
struct StoredParams {
    magic: u16,
    version: u8,
    values: ParamSet,
}

/// Parameter table with a selection cursor, persisted through a
/// [`StoragePort`].
pub struct ParamStore<S> {
    values: ParamSet,
    /// Last values known to be on storage; `None` until the first
    /// successful load or write.
    persisted: Option<ParamSet>,
    selected: ParamId,
    storage: S,
}

impl<S: StoragePort> ParamStore<S> {
    /// Factory defaults, nothing read from `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            values: ParamSet::defaults(),
            persisted: None,
            selected: ParamId::FIRST,
            storage,
        }
    }

    /// Read the stored table, falling back to defaults when it is missing
    /// or unusable.
    pub fn load(storage: S) -> Self {
        let mut store = Self::new(storage);
        match read_stored(&store.storage) {
            Ok(values) => {
                info!("params: loaded from storage");
                store.values = values;
                store.persisted = Some(values);
            }
            Err(e) => warn!("params: {} -- using defaults", e),
        }
        store
    }

    pub fn values(&self) -> &ParamSet {
        &self.values
    }

    pub fn set_value(&mut self, id: ParamId, value: i16) {
        self.values.set(id, value);
    }

    /// True when the in-memory table differs from what was last written.
    pub fn is_dirty(&self) -> bool {
        self.persisted != Some(self.values)
    }

    /// Write the table if it changed since the last successful write.
    pub fn persist(&mut self) -> Result<()> {
        if !self.is_dirty() {
            return Ok(());
        }
        let stored = StoredParams {
            magic: PARAMS_MAGIC,
            version: PARAMS_VERSION,
            values: self.values,
        };
        let mut buf = [0u8; PARAM_BLOB_LEN];
        let blob = postcard::to_slice(&stored, &mut buf).map_err(|_| ParamError::Encode)?;
        self.storage.write(blob)?;
        self.persisted = Some(self.values);
        info!("params: saved ({} bytes)", blob.len());
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

fn read_stored(storage: &impl StoragePort) -> Result<ParamSet> {
    let mut buf = [0u8; PARAM_BLOB_LEN];
    let len = storage.read(&mut buf)?;
    let stored: StoredParams = postcard::from_bytes(&buf[..len])?;
    if stored.magic != PARAMS_MAGIC {
        return Err(ParamError::BadMagic.into());
    }
    if stored.version != PARAMS_VERSION {
        return Err(ParamError::UnsupportedVersion(stored.version).into());
    }
    Ok(stored.values.clamped())
}

impl<S: StoragePort> ParamPort for ParamStore<S> {
    fn selected_param_id(&self) -> ParamId {
        self.selected
    }

    fn set_selected_param_id(&mut self, id: ParamId) {
        self.selected = id;
    }

    fn increment_selected_param_id(&mut self) {
        self.selected = self.selected.next();
    }

    fn decrement_selected_param_id(&mut self) {
        self.selected = self.selected.prev();
    }

    fn increment_selected_param_value(&mut self) {
        self.values.step(self.selected, 1);
    }

    fn decrement_selected_param_value(&mut self) {
        self.values.step(self.selected, -1);
    }

    fn param_value(&self, id: ParamId) -> i16 {
        self.values.get(id)
    }

    fn persist_params(&mut self) -> Result<()> {
        self.persist()
    }
}
