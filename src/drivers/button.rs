//! Edge-interrupt button driver.
//!
//! ## Hardware
//!
//! Three momentary switches to ground with pull-ups on one port, so a
//! pressed button reads `0`.  The port raises one interrupt on either edge
//! of any button; the ISR samples the whole port and calls
//! [`ButtonDebouncer::on_edge`].
//!
//! ## Change tracking
//!
//! Each sample is XORed against the previous state and the result is
//! OR-ed into a pending-change mask.  A pending bit is consumed exactly
//! once by [`ButtonDebouncer::take_change`].  Only the latest unconsumed
//! transition per button is representable: this is a flag set, not a
//! queue.
//!
//! | Step              | `pressed` | `changed` | Event          |
//! |-------------------|-----------|-----------|----------------|
//! | idle              | `000`     | `000`     |                |
//! | B1 + B2 go down   | `011`     | `011`     | `Press(One)`   |
//! | spurious edge     | `011`     | `010`     | `Press(Two)`   |
//! | spurious edge     | `011`     | `000`     | none           |

use log::debug;

use crate::events::{Button, MenuEvent};
use crate::pins::BUTTONS_MASK;

/// Pressed-state and pending-change bitmasks over the button port bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSnapshot {
    pressed: u8,
    changed: u8,
}

impl ButtonSnapshot {
    /// Build a snapshot from raw bitmasks (bits outside the button mask
    /// are dropped).
    pub const fn from_bits(pressed: u8, changed: u8) -> Self {
        Self {
            pressed: pressed & BUTTONS_MASK,
            changed: changed & BUTTONS_MASK,
        }
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed & button.mask() != 0
    }

    /// Whether a transition of `button` is waiting to be consumed.
    pub fn has_change(&self, button: Button) -> bool {
        self.changed & button.mask() != 0
    }

    /// Currently pressed buttons as port bits.
    pub fn pressed_bits(&self) -> u8 {
        self.pressed
    }

    /// Unconsumed transitions as port bits.
    pub fn changed_bits(&self) -> u8 {
        self.changed
    }

    /// True when no button is held.
    pub fn all_released(&self) -> bool {
        self.pressed == 0
    }
}

/// Turns raw port samples into pressed state and discrete edge events.
#[derive(Debug, Clone, Default)]
pub struct ButtonDebouncer {
    snapshot: ButtonSnapshot,
}

impl ButtonDebouncer {
    /// All buttons released, nothing pending.
    pub const fn new() -> Self {
        Self {
            snapshot: ButtonSnapshot::from_bits(0, 0),
        }
    }

    /// Seed the pressed state from an initial port read at boot.  Nothing
    /// is marked as changed, so a button held through power-up does not
    /// produce a press.
    pub const fn with_port(raw_port: u8) -> Self {
        Self {
            snapshot: ButtonSnapshot::from_bits(decode_port(raw_port), 0),
        }
    }

    /// Record a raw port sample.  Called only from the edge ISR.
    pub fn sample(&mut self, raw_port: u8) -> ButtonSnapshot {
        let pressed = decode_port(raw_port);
        let changed = self.snapshot.pressed ^ pressed;
        self.snapshot.pressed = pressed;
        self.snapshot.changed |= changed;
        self.snapshot
    }

    /// Current level of `button`.  Side-effect free.
    pub fn is_pressed(&self, button: Button) -> bool {
        self.snapshot.is_pressed(button)
    }

    /// Consume the pending change for `button`, if any.
    pub fn take_change(&mut self, button: Button) -> bool {
        if self.snapshot.has_change(button) {
            self.snapshot.changed &= !button.mask();
            true
        } else {
            false
        }
    }

    /// Synthesize at most one event from the pending changes.
    ///
    /// Buttons are checked in priority order; the first pending one wins
    /// and its direction comes from the *current* level.  Any other pending
    /// change stays pending for the next call.
    pub fn next_event(&mut self) -> Option<MenuEvent> {
        let button = Button::ALL.into_iter().find(|&b| self.take_change(b))?;
        let event = if self.is_pressed(button) {
            MenuEvent::Press(button)
        } else {
            MenuEvent::Release(button)
        };
        debug!("button: {:?}", event);
        Some(event)
    }

    /// Full ISR body: sample the port, then dispatch one event.
    pub fn on_edge(&mut self, raw_port: u8) -> Option<MenuEvent> {
        self.sample(raw_port);
        self.next_event()
    }

    /// Copy of the current state for readers outside the ISR.
    pub fn snapshot(&self) -> ButtonSnapshot {
        self.snapshot
    }
}

/// Buttons pull the line to ground: invert, then keep only button bits.
const fn decode_port(raw_port: u8) -> u8 {
    !raw_port & BUTTONS_MASK
}
