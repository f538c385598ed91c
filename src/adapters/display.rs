//! Display enable flag.
//!
//! The seven-segment multiplexer lives outside this crate; it reads
//! [`DisplayGate::is_blanked`] on every refresh and skips the digits while
//! the flag is set.

use crate::app::ports::DisplayPort;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayGate {
    blanked: bool,
}

impl DisplayGate {
    pub const fn new() -> Self {
        Self { blanked: false }
    }

    pub fn is_blanked(&self) -> bool {
        self.blanked
    }
}

impl DisplayPort for DisplayGate {
    fn set_display_blanked(&mut self, blanked: bool) {
        self.blanked = blanked;
    }
}
