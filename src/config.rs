//! Timing and filtering parameters.
//!
//! Every menu timeout is expressed in ticks of the periodic timer
//! interrupt, never in wall-clock units.  [`MenuTiming`] derives the
//! thresholds from the tick rate so a board with a different timer
//! divider only has to change [`TICKS_PER_SECOND`].

/// Rate at which `Controller::tick` must be called.
pub const TICKS_PER_SECOND: u16 = 32;

/// Shift used by the ADC moving average (weight 1/16 per sample).
pub const ADC_AVERAGING_BITS: u32 = 4;

/// Uptime bit that drives the SetTimer blink.  Bit 2 of a 32 Hz counter
/// toggles every 4 ticks: 125 ms blanked, 125 ms shown.
pub const BLINK_MASK: u32 = 0x04;

/// Tick thresholds used by the menu state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTiming {
    /// Ticks in one second.  Auto-repeat rewinds the timer to this value.
    pub one_sec: u16,
    /// Hold duration for long-press gestures.
    pub three_sec: u16,
    /// Inactivity timeout; also the short/long release boundary.
    pub five_sec: u16,
    /// Extra hold beyond one second before auto-repeat starts, and the
    /// cadence once it has.
    pub auto_repeat_delay: u16,
}

impl MenuTiming {
    /// Derive all thresholds from the periodic tick rate.
    pub const fn from_tick_rate(ticks_per_sec: u16) -> Self {
        Self {
            one_sec: ticks_per_sec,
            three_sec: ticks_per_sec * 3,
            five_sec: ticks_per_sec * 5,
            auto_repeat_delay: ticks_per_sec / 8,
        }
    }

    /// Timer value past which a held +/- button starts repeating.
    pub const fn auto_repeat_threshold(&self) -> u16 {
        self.one_sec + self.auto_repeat_delay
    }
}

impl Default for MenuTiming {
    fn default() -> Self {
        Self::from_tick_rate(TICKS_PER_SECOND)
    }
}
