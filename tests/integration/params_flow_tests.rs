//! Parameter editing through the menu and persistence to storage.

use fermenter::app::{ParamId, ParamSet, ParamStore};
use fermenter::app::ports::ParamPort;
use fermenter::events::Button;
use fermenter::fsm::MenuState;

use super::mock_hw::{Panel, RecordingPin, controller_with};

#[test]
fn edited_value_is_saved_on_timeout_and_survives_reboot() {
    let mut panel = Panel::new();
    panel.enter_select_param();

    // P0 -> P1, then edit Hysteresis up by three.
    panel.press(Button::Two);
    panel.release(Button::Two);
    panel.press(Button::One);
    panel.release(Button::One);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::ChangeParam);
    for _ in 0..3 {
        panel.press(Button::Two);
        panel.release(Button::Two);
    }
    panel.ticks(161);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::Root);

    let storage = panel.storage();
    assert_eq!(storage.write_count(), 1);

    let rebooted = Panel::with(controller_with(storage, RecordingPin::default()));
    let hysteresis = rebooted
        .ctl
        .with_io(|hw| hw.param_value(ParamId::Hysteresis));
    assert_eq!(hysteresis, 23);
}

#[test]
fn set_timer_quick_edit_saves_fermentation_time() {
    let mut panel = Panel::new();
    panel.enter_set_timer();
    panel.press(Button::Two);
    panel.release(Button::Two);
    panel.press(Button::Two);
    panel.release(Button::Two);
    panel.press(Button::One);
    assert_eq!(panel.ctl.current_menu_display(), MenuState::Root);
    panel.release(Button::One);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::Root);

    let stored = ParamStore::load(panel.storage());
    assert_eq!(stored.param_value(ParamId::FermentationTime), 10);
}

#[test]
fn unchanged_params_are_not_rewritten() {
    let mut panel = Panel::new();
    panel.enter_select_param();
    panel.ticks(161);
    assert_eq!(panel.storage().write_count(), 1);

    panel.enter_select_param();
    panel.ticks(161);
    assert_eq!(panel.storage().write_count(), 1);
}

#[test]
fn failed_save_still_returns_to_root() {
    let mut panel = Panel::new();
    panel
        .ctl
        .with_io(|hw| hw.params_mut().storage_mut().fail_writes(true));
    panel.enter_select_param();
    panel.press(Button::One);
    panel.release(Button::One);
    panel.press(Button::Three);
    panel.release(Button::Three);
    panel.ticks(161);
    assert_eq!(panel.ctl.current_menu_state(), MenuState::Root);
    assert!(panel.ctl.with_io(|hw| hw.params().is_dirty()));
    assert_eq!(panel.storage().contents(), None);
}

#[test]
fn value_edits_clamp_at_range() {
    let mut panel = Panel::new();
    panel.enter_select_param();
    for _ in 0..10 {
        panel.press(Button::Two);
        panel.release(Button::Two);
    }
    let selected = panel.ctl.with_io(|hw| hw.selected_param_id());
    assert_eq!(selected, ParamId::FermentationTime);

    panel.press(Button::One);
    panel.release(Button::One);
    panel.press(Button::Two);
    // Auto-repeat up to the 48 h maximum.
    panel.ticks(37 + 5 * 60);
    panel.release(Button::Two);
    assert_eq!(
        panel.ctl.with_io(|hw| hw.param_value(ParamId::FermentationTime)),
        48
    );
    assert_eq!(
        panel.ctl.with_io(|hw| hw.params().values().get(ParamId::Threshold)),
        ParamSet::defaults().get(ParamId::Threshold)
    );
}
