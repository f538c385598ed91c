//! Controller integration tests: edge, tick and ADC interrupts against
//! the real menu, parameter store and thermostat.

use fermenter::adapters::MemStorage;
use fermenter::app::ParamId;
use fermenter::app::params::TemperatureAlarm;
use fermenter::app::ports::{ParamPort, RelayPort};
use fermenter::config::BLINK_MASK;
use fermenter::events::{Button, MenuEvent};
use fermenter::fsm::MenuState;

use super::mock_hw::{BrokenPin, IDLE_PORT, Panel, controller_with};

// ── Button dispatch ───────────────────────────────────────────

#[test]
fn press_and_release_are_reported_in_order() {
    let mut panel = Panel::new();
    assert_eq!(panel.press(Button::Two), Some(MenuEvent::Press(Button::Two)));
    assert!(panel.ctl.is_button_pressed(Button::Two));
    assert!(!panel.ctl.is_button_pressed(Button::One));
    assert_eq!(
        panel.release(Button::Two),
        Some(MenuEvent::Release(Button::Two))
    );
    assert!(!panel.ctl.is_button_pressed(Button::Two));
}

#[test]
fn spurious_edge_emits_nothing() {
    let panel = Panel::new();
    assert_eq!(panel.ctl.on_button_edge(IDLE_PORT), None);
    assert_eq!(panel.ctl.dispatch_pending_edge(), None);
}

#[test]
fn simultaneous_presses_dispatch_one_per_call() {
    let mut panel = Panel::new();
    let both = IDLE_PORT & !(Button::One.mask() | Button::Three.mask());
    assert_eq!(panel.set_port(both), Some(MenuEvent::Press(Button::One)));
    assert_eq!(
        panel.ctl.dispatch_pending_edge(),
        Some(MenuEvent::Press(Button::Three))
    );
    assert_eq!(panel.ctl.dispatch_pending_edge(), None);
}

#[test]
fn pending_change_is_picked_up_by_next_edge() {
    let mut panel = Panel::new();
    let both = IDLE_PORT & !(Button::Two.mask() | Button::Three.mask());
    assert_eq!(panel.set_port(both), Some(MenuEvent::Press(Button::Two)));
    // Same port value again: no new physical change, but button 3 is
    // still pending.
    assert_eq!(panel.set_port(both), Some(MenuEvent::Press(Button::Three)));
}

// ── Menu through the interrupts ───────────────────────────────

#[test]
fn short_press_enters_set_timer() {
    let mut panel = Panel::new();
    panel.press(Button::One);
    assert_eq!(panel.ctl.current_menu_display(), MenuState::SetTimer);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::Root);
    panel.ticks(40);
    panel.release(Button::One);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::SetTimer);
    assert_eq!(panel.ctl.menu_timer(), 0);
}

#[test]
fn long_press_enters_select_param() {
    let mut panel = Panel::new();
    panel
        .ctl
        .with_io(|hw| hw.set_selected_param_id(ParamId::Hysteresis));
    panel.press(Button::One);
    panel.ticks(100);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::SelectParam);
    assert_eq!(panel.ctl.current_menu_display(), MenuState::SelectParam);
    let selected = panel.ctl.with_io(|hw| hw.selected_param_id());
    assert_eq!(selected, ParamId::FIRST);
}

#[test]
fn set_timer_blink_reaches_display_gate() {
    let mut panel = Panel::new();
    panel.enter_set_timer();
    for _ in 0..16 {
        panel.ticks(1);
        let expected = panel.ctl.uptime_ticks() & BLINK_MASK != 0;
        assert_eq!(panel.ctl.with_io(|hw| hw.display().is_blanked()), expected);
    }
    panel.ticks(161);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::Root);
    assert!(!panel.ctl.with_io(|hw| hw.display().is_blanked()));
}

#[test]
fn uptime_counts_ticks_and_seconds() {
    let panel = Panel::new();
    panel.ticks(70);
    assert_eq!(panel.ctl.uptime_ticks(), 70);
    assert_eq!(panel.ctl.uptime_seconds(), 2);
}

// ── Relay and fermentation ────────────────────────────────────

#[test]
fn hold2_enables_thermostat_which_then_regulates() {
    let mut panel = Panel::new();
    panel.press(Button::Two);
    panel.ticks(97);
    panel.release(Button::Two);
    assert!(panel.ctl.with_io(|hw| hw.is_relay_enabled()));

    // 25.5 C against the default 42.0 C target: heat.
    for _ in 0..4 {
        panel.ctl.on_sample_ready(337);
    }
    let temp = panel.ctl.current_temperature();
    assert_eq!(temp, 255);
    panel.ctl.with_io(|hw| hw.regulate(temp));
    assert!(panel.ctl.with_io(|hw| hw.thermostat().is_relay_on()));
    assert!(panel.ctl.with_io(|hw| hw.thermostat().pin().is_high()));

    // Hold 2 again: off, and the relay drops.
    panel.press(Button::Two);
    panel.ticks(97);
    panel.release(Button::Two);
    assert!(!panel.ctl.with_io(|hw| hw.is_relay_enabled()));
    let levels = panel.ctl.with_io(|hw| hw.thermostat().pin().levels.clone());
    assert_eq!(levels, vec![true, false]);
}

#[test]
fn fermentation_runs_for_configured_hours() {
    let mut panel = Panel::new();
    panel
        .ctl
        .with_io(|hw| hw.params_mut().set_value(ParamId::FermentationTime, 1));

    panel.press(Button::Three);
    panel.ticks(97);
    panel.release(Button::Three);
    assert!(panel.ctl.with_io(|hw| hw.is_fermentation_timer_running()));
    assert!(panel.ctl.with_io(|hw| hw.is_relay_enabled()));

    panel.ticks(3599 * 32);
    assert!(panel.ctl.with_io(|hw| hw.is_fermentation_timer_running()));
    assert_eq!(
        panel
            .ctl
            .with_io(|hw| hw.thermostat().fermentation_remaining_secs()),
        Some(1)
    );

    panel.ticks(64);
    assert!(!panel.ctl.with_io(|hw| hw.is_fermentation_timer_running()));
    assert!(!panel.ctl.with_io(|hw| hw.is_relay_enabled()));
    assert_eq!(
        panel
            .ctl
            .with_io(|hw| hw.thermostat().fermentation_elapsed_secs()),
        3600
    );
}

#[test]
fn broken_relay_pin_does_not_stop_the_menu() {
    let mut panel = Panel::with(controller_with(MemStorage::new(), BrokenPin));
    panel.press(Button::Two);
    panel.ticks(97);
    panel.release(Button::Two);
    assert!(panel.ctl.with_io(|hw| hw.is_relay_enabled()));
    panel.ctl.with_io(|hw| hw.regulate(0));
    assert!(!panel.ctl.with_io(|hw| hw.thermostat().is_relay_on()));
    assert_eq!(panel.ctl.current_menu_state(), MenuState::Root);
}

// ── Temperature ───────────────────────────────────────────────

#[test]
fn first_sample_seeds_average() {
    let panel = Panel::new();
    panel.ctl.on_sample_ready(340);
    assert_eq!(panel.ctl.averaged_adc(), 340);
    assert_eq!(panel.ctl.current_temperature(), 252);
    let reading = panel.ctl.temperature_reading();
    assert_eq!(reading.raw, 340);
    assert_eq!(reading.averaged, 340);
    assert_eq!(reading.tenths, 252);
}

#[test]
fn correction_parameter_shifts_temperature() {
    let panel = Panel::new();
    panel.ctl.on_sample_ready(337);
    panel
        .ctl
        .with_io(|hw| hw.params_mut().set_value(ParamId::TemperatureCorrection, -15));
    assert_eq!(panel.ctl.current_temperature(), 240);
}

#[test]
fn temperature_alarm_follows_limits() {
    let panel = Panel::new();
    panel.ctl.with_io(|hw| {
        let params = hw.params_mut();
        params.set_value(ParamId::OverheatIndication, 1);
        params.set_value(ParamId::MaxTemperature, 250);
    });
    panel.ctl.on_sample_ready(337);
    let temp = panel.ctl.current_temperature();
    assert_eq!(
        panel.ctl.with_io(|hw| hw.temperature_alarm(temp)),
        Some(TemperatureAlarm::TooHot)
    );
}
