//! Interrupt-facing input drivers.

pub mod button;

pub use button::{ButtonDebouncer, ButtonSnapshot};
