//! Menu / timer state machine.
//!
//! ```text
//!            Press1 <5s                     Release1 <5s
//!   ROOT ──────────────────▶ SET_TIMER ─────────────────▶ ROOT
//!    │  hold1 >3s                │ hold1 at 5s timeout
//!    ▼                           ▼
//!   SELECT_PARAM ◀──Press1──▶ CHANGE_PARAM
//!    │ 5s idle                   │ 5s idle
//!    ▼                           ▼
//!   ROOT (params saved)         ROOT (params saved)
//! ```
//!
//! Two variables describe where the menu is.  [`Menu::state`] drives the
//! transition logic; [`Menu::display`] is what the renderer should show.
//! They move together except while a button 1 gesture is undecided: in
//! Root, pressing button 1 shows SetTimer immediately but the behaviour
//! only follows on a short release.
//!
//! The timer counts [`MenuEvent::Tick`]s since the last reset.  All
//! thresholds come from [`MenuTiming`] and are compared on every tick, so
//! timeouts are level-triggered.

pub mod context;
pub mod states;

pub use context::MenuContext;

use log::info;

use crate::app::ports::MenuPorts;
use crate::config::{MenuTiming, TICKS_PER_SECOND};
use crate::events::MenuEvent;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Menu screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MenuState {
    /// Temperature / status screen.
    #[default]
    Root = 0,
    /// Choosing a parameter slot (`P0`..`P6`).
    SelectParam = 1,
    /// Editing the selected parameter's value.
    ChangeParam = 2,
    /// Quick edit of the fermentation time.
    SetTimer = 3,
}

impl MenuState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::SelectParam => "SelectParam",
            Self::ChangeParam => "ChangeParam",
            Self::SetTimer => "SetTimer",
        }
    }
}

/// What the renderer should show.  Same domain as [`MenuState`], tracked
/// separately.
pub type MenuDisplay = MenuState;

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The menu state machine.  Lives for the whole program.
#[derive(Debug, Clone)]
pub struct Menu {
    state: MenuState,
    display: MenuDisplay,
    timer: u16,
    timing: MenuTiming,
}

impl Menu {
    /// Root / Root / 0 with the default 32 Hz thresholds.
    pub const fn new() -> Self {
        Self::with_timing(MenuTiming::from_tick_rate(TICKS_PER_SECOND))
    }

    pub const fn with_timing(timing: MenuTiming) -> Self {
        Self {
            state: MenuState::Root,
            display: MenuState::Root,
            timer: 0,
            timing,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn display(&self) -> MenuDisplay {
        self.display
    }

    /// Ticks since the last timer reset.
    pub fn timer(&self) -> u16 {
        self.timer
    }

    pub fn timing(&self) -> &MenuTiming {
        &self.timing
    }

    /// Deliver one event to the handler of the current state.  Events a
    /// state has no rule for are ignored.
    pub fn feed<IO: MenuPorts>(&mut self, event: MenuEvent, ctx: &mut MenuContext<'_, IO>) {
        match self.state {
            MenuState::Root => states::root(self, event, ctx),
            MenuState::SelectParam => states::select_param(self, event, ctx),
            MenuState::ChangeParam => states::change_param(self, event, ctx),
            MenuState::SetTimer => states::set_timer(self, event, ctx),
        }
    }

    /// Advance the timer by one tick and evaluate the current state's
    /// time-based rules.
    pub fn tick<IO: MenuPorts>(&mut self, ctx: &mut MenuContext<'_, IO>) {
        self.timer = self.timer.saturating_add(1);
        self.feed(MenuEvent::Tick, ctx);
    }

    // -----------------------------------------------------------------------
    // Helpers for the state handlers
    // -----------------------------------------------------------------------

    /// Move both behaviour and display to `next`.
    fn enter(&mut self, next: MenuState) {
        self.set_state(next);
        self.display = next;
    }

    /// Move the behaviour only; the display keeps whatever it shows.
    fn set_state(&mut self, next: MenuState) {
        if next != self.state {
            info!("menu: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }

    /// Change what is shown without changing behaviour.
    fn show(&mut self, display: MenuDisplay) {
        self.display = display;
    }

    fn restart_timer(&mut self) {
        self.timer = 0;
    }

    /// Rewind to one second so the next auto-repeat follows after the
    /// repeat delay instead of a full hold.
    fn rewind_timer_for_repeat(&mut self) {
        self.timer = self.timing.one_sec;
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
