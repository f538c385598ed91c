//! Port traits: the boundary between the control core and the appliance.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Menu FSM / Controller (domain)
//! ```
//!
//! The menu state machine never touches the relay pin, the EEPROM or the
//! display driver directly; it calls these traits.  The
//! [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter) bundles
//! the concrete implementations, and tests substitute recording mocks.

use crate::app::params::ParamId;
use crate::error::{Result, StorageError};

// ───────────────────────────────────────────────────────────────
// Relay / fermentation timer port
// ───────────────────────────────────────────────────────────────

/// Thermostat enable and the fermentation countdown.
pub trait RelayPort {
    /// Whether thermostat regulation is enabled.
    fn is_relay_enabled(&self) -> bool;

    /// Enable or disable thermostat regulation.  Disabling de-energises the
    /// relay immediately.
    fn enable_relay(&mut self, enabled: bool);

    fn is_fermentation_timer_running(&self) -> bool;

    fn start_fermentation_timer(&mut self);

    fn stop_fermentation_timer(&mut self);

    /// Called once per second of uptime from the tick interrupt.
    fn on_second(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Parameter port
// ───────────────────────────────────────────────────────────────

/// The user-parameter table as seen by the menu.
pub trait ParamPort {
    /// Parameter currently selected for display/editing.
    fn selected_param_id(&self) -> ParamId;

    fn set_selected_param_id(&mut self, id: ParamId);

    /// Select the next parameter (clamps at the last).
    fn increment_selected_param_id(&mut self);

    /// Select the previous parameter (clamps at the first).
    fn decrement_selected_param_id(&mut self);

    /// Step the selected parameter's value up (clamps at its maximum).
    fn increment_selected_param_value(&mut self);

    /// Step the selected parameter's value down (clamps at its minimum).
    fn decrement_selected_param_value(&mut self);

    fn param_value(&self, id: ParamId) -> i16;

    /// Durably save the parameter table.  May be slow.
    fn persist_params(&mut self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Display enable, used only for the SetTimer blink.
pub trait DisplayPort {
    fn set_display_blanked(&mut self, blanked: bool);
}

/// Everything the menu state machine calls out to.
pub trait MenuPorts: RelayPort + ParamPort + DisplayPort {}

impl<T: RelayPort + ParamPort + DisplayPort> MenuPorts for T {}

// ───────────────────────────────────────────────────────────────
// Storage port (EEPROM / flash)
// ───────────────────────────────────────────────────────────────

/// A single persistent blob area.
///
/// Writes must be atomic with respect to power loss, or the caller must
/// tolerate a corrupted read on the next boot (the parameter store does:
/// it falls back to defaults).
pub trait StoragePort {
    /// Read the stored blob into `buf`.  Returns the number of bytes read.
    fn read(&self, buf: &mut [u8]) -> core::result::Result<usize, StorageError>;

    /// Replace the stored blob.
    fn write(&mut self, data: &[u8]) -> core::result::Result<(), StorageError>;
}
