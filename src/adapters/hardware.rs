//! Hardware adapter: bridges the appliance peripherals to the port traits.
//!
//! Owns the parameter store, the relay thermostat and the display gate,
//! exposing them to the menu through [`RelayPort`], [`ParamPort`] and
//! [`DisplayPort`].  The main loop reaches it through
//! [`Controller::with_io`](crate::app::service::Controller::with_io) to run
//! [`regulate`](HardwareAdapter::regulate) and to read what it renders.

use embedded_hal::digital::OutputPin;

use crate::adapters::display::DisplayGate;
use crate::app::params::{ParamId, ParamStore, TemperatureAlarm};
use crate::app::ports::{DisplayPort, ParamPort, RelayPort, StoragePort};
use crate::app::thermostat::Thermostat;
use crate::error::Result;

/// Concrete adapter that combines all collaborators behind port traits.
pub struct HardwareAdapter<S, P> {
    params: ParamStore<S>,
    thermostat: Thermostat<P>,
    display: DisplayGate,
}

impl<S: StoragePort, P: OutputPin> HardwareAdapter<S, P> {
    pub fn new(params: ParamStore<S>, thermostat: Thermostat<P>) -> Self {
        let mut adapter = Self {
            params,
            thermostat,
            display: DisplayGate::new(),
        };
        adapter.sync_fermentation_time();
        adapter
    }

    /// Run one regulation step against the stored threshold and
    /// hysteresis.  `temperature` is in tenths of a degree.
    pub fn regulate(&mut self, temperature: i16) {
        let threshold = self.params.param_value(ParamId::Threshold);
        let hysteresis = self.params.param_value(ParamId::Hysteresis);
        self.thermostat.regulate(temperature, threshold, hysteresis);
    }

    /// Out-of-range indication for the root screen.
    pub fn temperature_alarm(&self, temperature: i16) -> Option<TemperatureAlarm> {
        self.params.values().temperature_alarm(temperature)
    }

    pub fn params(&self) -> &ParamStore<S> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamStore<S> {
        &mut self.params
    }

    pub fn thermostat(&self) -> &Thermostat<P> {
        &self.thermostat
    }

    pub fn display(&self) -> &DisplayGate {
        &self.display
    }

    fn sync_fermentation_time(&mut self) {
        let hours = self.params.param_value(ParamId::FermentationTime);
        self.thermostat.set_fermentation_hours(hours);
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl<S: StoragePort, P: OutputPin> RelayPort for HardwareAdapter<S, P> {
    fn is_relay_enabled(&self) -> bool {
        self.thermostat.is_relay_enabled()
    }

    fn enable_relay(&mut self, enabled: bool) {
        self.thermostat.enable_relay(enabled);
    }

    fn is_fermentation_timer_running(&self) -> bool {
        self.thermostat.is_fermentation_timer_running()
    }

    fn start_fermentation_timer(&mut self) {
        self.sync_fermentation_time();
        self.thermostat.start_fermentation_timer();
    }

    fn stop_fermentation_timer(&mut self) {
        self.thermostat.stop_fermentation_timer();
    }

    fn on_second(&mut self) {
        self.sync_fermentation_time();
        self.thermostat.on_second();
    }
}

// ── ParamPort implementation ──────────────────────────────────

impl<S: StoragePort, P: OutputPin> ParamPort for HardwareAdapter<S, P> {
    fn selected_param_id(&self) -> ParamId {
        self.params.selected_param_id()
    }

    fn set_selected_param_id(&mut self, id: ParamId) {
        self.params.set_selected_param_id(id);
    }

    fn increment_selected_param_id(&mut self) {
        self.params.increment_selected_param_id();
    }

    fn decrement_selected_param_id(&mut self) {
        self.params.decrement_selected_param_id();
    }

    fn increment_selected_param_value(&mut self) {
        self.params.increment_selected_param_value();
    }

    fn decrement_selected_param_value(&mut self) {
        self.params.decrement_selected_param_value();
    }

    fn param_value(&self, id: ParamId) -> i16 {
        self.params.param_value(id)
    }

    fn persist_params(&mut self) -> Result<()> {
        self.params.persist()
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<S: StoragePort, P: OutputPin> DisplayPort for HardwareAdapter<S, P> {
    fn set_display_blanked(&mut self, blanked: bool) {
        self.display.set_display_blanked(blanked);
    }
}
