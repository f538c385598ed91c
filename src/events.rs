//! Events consumed by the menu state machine.
//!
//! Events are produced by two interrupt sources:
//! - the button-edge ISR, which synthesizes at most one `Press`/`Release`
//!   per invocation from the debouncer's pending-change mask
//! - the periodic timer ISR, which emits `Tick` on every invocation
//!
//! ```text
//! ┌─────────────┐  Press/Release  ┌──────────────┐
//! │ Edge ISR    │────────────────▶│              │
//! │             │                 │  Menu FSM    │
//! │ Timer ISR   │────────────────▶│              │
//! └─────────────┘      Tick       └──────────────┘
//! ```
//!
//! Both paths deliver into the menu under the same critical section, so
//! events reach the state machine in the order their interrupts ran.

use crate::pins::{BUTTON1_BIT, BUTTON2_BIT, BUTTON3_BIT};

/// One of the three front-panel buttons.
///
/// Declaration order is the dispatch priority when several buttons change
/// in the same edge interrupt: lower-numbered button wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Button {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Button {
    /// All buttons in dispatch priority order.
    pub const ALL: [Button; 3] = [Button::One, Button::Two, Button::Three];

    /// Port bit for this button.
    pub const fn mask(self) -> u8 {
        match self {
            Self::One => BUTTON1_BIT,
            Self::Two => BUTTON2_BIT,
            Self::Three => BUTTON3_BIT,
        }
    }

    /// Convert a 1-based button number.
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

/// Input to [`Menu::feed`](crate::fsm::Menu::feed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Button went down.
    Press(Button),
    /// Button came back up.
    Release(Button),
    /// One periodic timer interrupt elapsed.
    Tick,
}

impl MenuEvent {
    /// The button this event concerns, if any.
    pub const fn button(self) -> Option<Button> {
        match self {
            Self::Press(b) | Self::Release(b) => Some(b),
            Self::Tick => None,
        }
    }
}
