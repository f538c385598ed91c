//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the [`Controller`] through
//! its interrupt entry points against mock peripherals.  All tests run on
//! the host with no real hardware required.
//!
//! [`Controller`]: fermenter::Controller

mod controller_tests;
mod mock_hw;
mod params_flow_tests;
