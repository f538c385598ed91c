//! Transition functions, one per [`MenuState`].
//!
//! Buttons 2 and 3 act on the press edge; their release edge only
//! restarts the timer.  Holding them past
//! [`MenuTiming::auto_repeat_threshold`](crate::config::MenuTiming::auto_repeat_threshold)
//! repeats the action and rewinds the timer to one second, which fixes
//! the cadence of further repeats.  Button 1 means something different in
//! every state.

use log::{info, warn};

use super::context::MenuContext;
use super::{Menu, MenuState};
use crate::app::params::ParamId;
use crate::app::ports::MenuPorts;
use crate::events::{Button, MenuEvent};

/// What buttons 2 and 3 adjust in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// The parameter cursor.
    Slot,
    /// The selected parameter's value.
    Value,
}

// ═══════════════════════════════════════════════════════════════════════════
//  ROOT
// ═══════════════════════════════════════════════════════════════════════════

pub(super) fn root<IO: MenuPorts>(m: &mut Menu, event: MenuEvent, ctx: &mut MenuContext<'_, IO>) {
    match event {
        MenuEvent::Press(Button::One) => {
            m.restart_timer();
            m.show(MenuState::SetTimer);
        }
        MenuEvent::Release(Button::One) => {
            if m.timer < m.timing.five_sec {
                m.set_state(MenuState::SetTimer);
            }
            m.restart_timer();
        }
        MenuEvent::Tick => {
            if m.timer <= m.timing.three_sec {
                return;
            }
            m.restart_timer();
            if ctx.held(Button::One) {
                ctx.io.set_selected_param_id(ParamId::FIRST);
                m.enter(MenuState::SelectParam);
            } else if ctx.held(Button::Two) {
                toggle_thermostat(ctx.io);
            } else if ctx.held(Button::Three) {
                toggle_fermentation(ctx.io);
            }
        }
        _ => {
            if m.timer > m.timing.five_sec {
                m.restart_timer();
                m.enter(MenuState::Root);
            }
        }
    }
}

/// Regulation can only be switched off while no fermentation is running.
fn toggle_thermostat<IO: MenuPorts>(io: &mut IO) {
    let enable = !io.is_relay_enabled() || io.is_fermentation_timer_running();
    io.enable_relay(enable);
    info!("menu: thermostat {}", if enable { "on" } else { "off" });
}

fn toggle_fermentation<IO: MenuPorts>(io: &mut IO) {
    if io.is_fermentation_timer_running() {
        io.stop_fermentation_timer();
        io.enable_relay(false);
        info!("menu: fermentation stopped");
    } else {
        io.start_fermentation_timer();
        io.enable_relay(true);
        info!("menu: fermentation started");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SELECT_PARAM
// ═══════════════════════════════════════════════════════════════════════════

pub(super) fn select_param<IO: MenuPorts>(
    m: &mut Menu,
    event: MenuEvent,
    ctx: &mut MenuContext<'_, IO>,
) {
    match event {
        MenuEvent::Press(Button::One) => {
            m.enter(MenuState::ChangeParam);
            m.restart_timer();
        }
        MenuEvent::Press(button) => {
            adjust(ctx.io, Target::Slot, button);
            m.restart_timer();
        }
        MenuEvent::Release(_) => m.restart_timer(),
        MenuEvent::Tick => {
            auto_repeat(m, ctx, Target::Slot);
            if m.timer > m.timing.five_sec {
                m.restart_timer();
                ctx.io.set_selected_param_id(ParamId::FIRST);
                persist(ctx.io);
                m.enter(MenuState::Root);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CHANGE_PARAM
// ═══════════════════════════════════════════════════════════════════════════

pub(super) fn change_param<IO: MenuPorts>(
    m: &mut Menu,
    event: MenuEvent,
    ctx: &mut MenuContext<'_, IO>,
) {
    match event {
        MenuEvent::Press(Button::One) => {
            m.enter(MenuState::SelectParam);
            m.restart_timer();
        }
        MenuEvent::Press(button) => {
            adjust(ctx.io, Target::Value, button);
            m.restart_timer();
        }
        MenuEvent::Release(_) => m.restart_timer(),
        MenuEvent::Tick => {
            auto_repeat(m, ctx, Target::Value);

            if ctx.held(Button::One) && m.timer > m.timing.three_sec {
                m.restart_timer();
                m.enter(MenuState::SelectParam);
                return;
            }

            if m.timer > m.timing.five_sec {
                m.restart_timer();
                persist(ctx.io);
                m.enter(MenuState::Root);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SET_TIMER
// ═══════════════════════════════════════════════════════════════════════════

pub(super) fn set_timer<IO: MenuPorts>(
    m: &mut Menu,
    event: MenuEvent,
    ctx: &mut MenuContext<'_, IO>,
) {
    match event {
        MenuEvent::Press(Button::One) => {
            m.restart_timer();
            m.show(MenuState::Root);
            ctx.io.set_display_blanked(false);
        }
        MenuEvent::Release(Button::One) => {
            if m.timer < m.timing.five_sec {
                persist(ctx.io);
                m.set_state(MenuState::Root);
                ctx.io.set_display_blanked(false);
            }
            m.restart_timer();
        }
        MenuEvent::Press(button) => {
            ctx.io.set_selected_param_id(ParamId::FermentationTime);
            adjust(ctx.io, Target::Value, button);
            m.restart_timer();
        }
        MenuEvent::Release(_) => m.restart_timer(),
        MenuEvent::Tick => {
            let blanked = if ctx.held(Button::Two) || ctx.held(Button::Three) {
                false
            } else {
                ctx.blink_phase()
            };

            if m.timer > m.timing.auto_repeat_threshold() {
                ctx.io.set_selected_param_id(ParamId::FermentationTime);
            }
            auto_repeat(m, ctx, Target::Value);

            ctx.io.set_display_blanked(blanked);

            if m.timer > m.timing.five_sec {
                m.restart_timer();
                if ctx.held(Button::One) {
                    m.enter(MenuState::SelectParam);
                    ctx.io.set_display_blanked(false);
                    return;
                }
                persist(ctx.io);
                m.enter(MenuState::Root);
                ctx.io.set_display_blanked(false);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Shared steps
// ---------------------------------------------------------------------------

/// Button 2 steps up, button 3 steps down.
fn adjust<IO: MenuPorts>(io: &mut IO, target: Target, button: Button) {
    match (target, button) {
        (Target::Slot, Button::Two) => io.increment_selected_param_id(),
        (Target::Slot, Button::Three) => io.decrement_selected_param_id(),
        (Target::Value, Button::Two) => io.increment_selected_param_value(),
        (Target::Value, Button::Three) => io.decrement_selected_param_value(),
        (_, Button::One) => {}
    }
}

/// Repeat the held button's action once the hold is long enough.
fn auto_repeat<IO: MenuPorts>(m: &mut Menu, ctx: &mut MenuContext<'_, IO>, target: Target) {
    if m.timer <= m.timing.auto_repeat_threshold() {
        return;
    }
    let button = if ctx.held(Button::Two) {
        Button::Two
    } else if ctx.held(Button::Three) {
        Button::Three
    } else {
        return;
    };
    adjust(ctx.io, target, button);
    m.rewind_timer_for_repeat();
}

fn persist<IO: MenuPorts>(io: &mut IO) {
    if let Err(e) = io.persist_params() {
        warn!("menu: saving parameters failed: {}", e);
    }
}
