//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements                         | Connects to            |
//! |------------|------------------------------------|------------------------|
//! | `hardware` | RelayPort, ParamPort, DisplayPort  | relay GPIO, EEPROM     |
//! | `storage`  | StoragePort                        | RAM blob area          |
//! | `display`  | DisplayPort                        | seven-segment refresh  |

pub mod display;
pub mod hardware;
pub mod storage;

pub use display::DisplayGate;
pub use hardware::HardwareAdapter;
pub use storage::MemStorage;
