//! Relay regulation and the fermentation countdown.
//!
//! The relay drives a heater.  While regulation is enabled it switches on
//! at `threshold - hysteresis` and off again at `threshold`, holding its
//! level in between.  The fermentation timer counts whole seconds; when it
//! reaches the configured duration it stops and disables regulation.
//!
//! A failed relay write leaves the commanded level unchanged.  While
//! disabled with the relay still on, every `regulate` and `on_second`
//! call retries the switch-off.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::app::ports::RelayPort;
use crate::error::{self, Error};

pub struct Thermostat<P> {
    pin: P,
    enabled: bool,
    /// Commanded pin level.
    relay_on: bool,
    fermenting: bool,
    elapsed_secs: u32,
    duration_secs: u32,
}

impl<P: OutputPin> Thermostat<P> {
    /// Disabled, relay off, no fermentation running.  The pin is not
    /// touched until the first command.
    pub const fn new(pin: P) -> Self {
        Self {
            pin,
            enabled: false,
            relay_on: false,
            fermenting: false,
            elapsed_secs: 0,
            duration_secs: 0,
        }
    }

    /// Commanded relay level.
    pub fn is_relay_on(&self) -> bool {
        self.relay_on
    }

    /// Seconds counted by the current (or last) fermentation run.
    pub fn fermentation_elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Seconds left before the running fermentation ends, if one runs.
    pub fn fermentation_remaining_secs(&self) -> Option<u32> {
        self.fermenting
            .then(|| self.duration_secs.saturating_sub(self.elapsed_secs))
    }

    /// Length of a fermentation run.  Takes effect on the next second,
    /// also for a run already in progress.
    pub fn set_fermentation_hours(&mut self, hours: i16) {
        self.duration_secs = u32::from(hours.max(0).unsigned_abs()) * 3600;
    }

    /// Bang-bang step for the current temperature (all values in tenths
    /// of a degree).  While regulation is disabled it only makes sure the
    /// relay is off.
    pub fn regulate(&mut self, temperature: i16, threshold: i16, hysteresis: i16) {
        if !self.enabled {
            self.switch_off();
            return;
        }
        let res = if temperature >= threshold {
            self.drive(false)
        } else if temperature <= threshold.saturating_sub(hysteresis) {
            self.drive(true)
        } else {
            Ok(())
        };
        if let Err(e) = res {
            warn!("thermostat: {}", e);
        }
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn release(self) -> P {
        self.pin
    }

    /// Commands the relay level.  On failure `relay_on` keeps its old value
    /// so the next call writes again.
    fn drive(&mut self, on: bool) -> error::Result<()> {
        if on == self.relay_on {
            return Ok(());
        }
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| Error::Relay)?;
        self.relay_on = on;
        Ok(())
    }

    fn switch_off(&mut self) {
        if let Err(e) = self.drive(false) {
            warn!("thermostat: {} (relay still on)", e);
        }
    }
}

impl<P: OutputPin> RelayPort for Thermostat<P> {
    fn is_relay_enabled(&self) -> bool {
        self.enabled
    }

    fn enable_relay(&mut self, enabled: bool) {
        if enabled != self.enabled {
            info!("thermostat: {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
        if !enabled {
            self.switch_off();
        }
    }

    fn is_fermentation_timer_running(&self) -> bool {
        self.fermenting
    }

    fn start_fermentation_timer(&mut self) {
        self.fermenting = true;
        self.elapsed_secs = 0;
        info!("thermostat: fermentation timer started ({} s)", self.duration_secs);
    }

    fn stop_fermentation_timer(&mut self) {
        if self.fermenting {
            info!("thermostat: fermentation timer stopped at {} s", self.elapsed_secs);
        }
        self.fermenting = false;
    }

    fn on_second(&mut self) {
        if !self.enabled {
            self.switch_off();
        }
        if !self.fermenting {
            return;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        if self.elapsed_secs >= self.duration_secs {
            info!("thermostat: fermentation complete after {} s", self.elapsed_secs);
            self.fermenting = false;
            self.enable_relay(false);
        }
    }
}
