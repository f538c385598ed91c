//! Fermenter control library.
//!
//! Button edge detection, the menu/timer state machine and NTC
//! temperature decoding for a fermentation appliance, plus the parameter
//! store and relay thermostat they drive.  Built `no_std` for firmware;
//! host tests link `std`.

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod sensors;

pub use app::Controller;
pub use error::{Error, Result};
