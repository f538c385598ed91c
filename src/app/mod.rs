//! Application core: menu orchestration and the collaborators it drives.
//!
//! The menu talks to the rest of the appliance only through the port
//! traits in [`ports`]; [`service::Controller`] wires the interrupt entry
//! points to the menu.

pub mod params;
pub mod ports;
pub mod service;
pub mod thermostat;

pub use params::{ParamId, ParamSet, ParamStore};
pub use service::Controller;
pub use thermostat::Thermostat;
