//! Per-call view handed to every menu state handler.
//!
//! The menu itself only owns its state, display and timer.  Everything
//! else a handler needs is borrowed for the duration of one
//! [`Menu::feed`](super::Menu::feed) call: the collaborator ports, the
//! current button levels and the free-running uptime counter.

use crate::config::BLINK_MASK;
use crate::drivers::button::ButtonSnapshot;
use crate::events::Button;

pub struct MenuContext<'a, IO> {
    /// Relay, parameter and display collaborators.
    pub io: &'a mut IO,
    /// Button levels at the time of the event.
    pub buttons: ButtonSnapshot,
    /// Free-running tick counter; drives the SetTimer blink.
    pub uptime_ticks: u32,
}

impl<'a, IO> MenuContext<'a, IO> {
    pub fn new(io: &'a mut IO, buttons: ButtonSnapshot, uptime_ticks: u32) -> Self {
        Self {
            io,
            buttons,
            uptime_ticks,
        }
    }

    /// Whether `button` is currently held down.
    pub fn held(&self, button: Button) -> bool {
        self.buttons.is_pressed(button)
    }

    /// True during the blanked half of the blink period.
    pub fn blink_phase(&self) -> bool {
        self.uptime_ticks & BLINK_MASK != 0
    }
}
