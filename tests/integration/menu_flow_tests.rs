//! Menu navigation and settings persistence through the full loop.

use crate::mock_hw::{MockBoard, Rig};

use svcmenu::adapters::settings_store::{SETTINGS_KEY, SETTINGS_NAMESPACE};
use svcmenu::app::events::AppEvent;
use svcmenu::app::ports::{RestartKind, SettingsPort, StoragePort};
use svcmenu::config::{ControllerSettings, OutputButton, PositionMode};
use svcmenu::fsm::Mode;
use svcmenu::menu::{FieldId, MenuId};

// Root menu item order.
const TOUCH_MODE: i32 = 3;
const BUTTON_MAP: i32 = 4;
const TOUCH_ZERO: i32 = 5;
const PASSTHROUGH: i32 = 6;
const CLEAR_SETTINGS: i32 = 7;

fn writes(rig: &Rig) -> usize {
    rig.hw.store.storage().writes
}

#[test]
fn hold_in_submenu_escapes_to_parent() {
    let mut rig = Rig::new();
    rig.turn(-1);
    assert_eq!(rig.screen(), ("Service Menu", "Restart..."));

    rig.short_press();
    assert_eq!(rig.screen(), ("Restart", "Main System"));

    rig.hold_for(600);
    assert_eq!(rig.svc.menu().current_menu(), Some(MenuId::Service));
    assert_eq!(rig.screen(), ("Service Menu", "Restart..."));
    assert!(rig.hw.restarts.is_empty());
}

#[test]
fn rotation_scrolls_and_wraps() {
    let mut rig = Rig::new();
    rig.turn(2);
    assert_eq!(rig.hw.row(1), "Touch Calib.");
    assert_eq!(rig.hw.rotary, 0, "accumulator consumed");

    // Less than a detent is left in the accumulator.
    rig.hw.rotary = 3;
    rig.tick();
    assert_eq!(rig.hw.row(1), "Touch Calib.");
    assert_eq!(rig.hw.rotary, 3);

    rig.hw.rotary = 0;
    rig.turn(-3);
    assert_eq!(rig.hw.row(1), "Restart...");
}

#[test]
fn mapping_slot_five_to_r2_persists_and_reads_back() {
    let mut rig = Rig::new();
    rig.turn(BUTTON_MAP);
    rig.short_press();
    assert_eq!(rig.screen(), ("Button Map", "Slot"));

    // Slot 5.
    rig.short_press();
    assert_eq!(rig.screen(), ("Slot", "[0]"));
    rig.turn(5);
    assert_eq!(rig.hw.row(1), "[5]");
    rig.short_press();
    assert_eq!(rig.svc.cursor(), 5);
    assert_eq!(writes(&rig), 0, "slot cursor is not persisted");

    // Button 12 (R2).
    rig.turn(1);
    rig.short_press();
    assert_eq!(rig.screen(), ("Button", "[XRO]"));
    rig.turn(12 - OutputButton::Cross as i32);
    assert_eq!(rig.hw.row(1), "[R2]");
    rig.short_press();

    assert_eq!(rig.svc.settings().button_mapping[5], OutputButton::R2);
    let stored = rig.hw.store.load().unwrap();
    assert_eq!(stored.button_mapping[5], OutputButton::R2);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::SettingsSaved(FieldId::MapButton)));

    // Reading back shows the stored value.
    rig.short_press();
    assert_eq!(rig.screen(), ("Button", "[R2]"));
}

#[test]
fn touch_zero_edit_clamps_and_updates_sensor() {
    let mut rig = Rig::new();
    rig.turn(TOUCH_ZERO);
    rig.short_press();
    assert_eq!(rig.screen(), ("Touch Zero", "[48]"));

    rig.turn(-100);
    assert_eq!(rig.hw.row(1), "[0]");
    rig.short_press();

    assert_eq!(rig.hw.coefficients.zero_level, 0);
    assert_eq!(rig.hw.store.load().unwrap().calibration.zero_level, 0);
    assert_eq!(rig.screen(), ("Service Menu", "Touch Zero"));
}

#[test]
fn escape_cancels_edit_without_saving() {
    let mut rig = Rig::new();
    rig.turn(PASSTHROUGH);
    rig.short_press();
    assert_eq!(rig.hw.row(1), "[N]");
    rig.turn(1);
    assert_eq!(rig.hw.row(1), "[Y]");

    rig.long_press();
    assert_eq!(rig.screen(), ("Service Menu", "Passthrough"));
    assert!(!rig.svc.settings().passthrough);
    assert_eq!(writes(&rig), 0);
}

#[test]
fn touch_mode_commit_is_saved_once_per_change() {
    let mut rig = Rig::new();
    rig.turn(TOUCH_MODE);
    rig.short_press();
    assert_eq!(rig.hw.row(1), "[Touchpad]");
    rig.turn(-1);
    assert_eq!(rig.hw.row(1), "[L/R]");
    rig.short_press();
    assert_eq!(rig.svc.settings().default_position_mode, PositionMode::LeftRight);
    assert_eq!(writes(&rig), 1);

    // Committing the same value again leaves storage alone.
    rig.short_press();
    rig.short_press();
    assert_eq!(writes(&rig), 1);
}

#[test]
fn clear_settings_restores_defaults() {
    let mut rig = Rig::new();
    rig.turn(PASSTHROUGH);
    rig.short_press();
    rig.turn(1);
    rig.short_press();
    assert!(rig.svc.settings().passthrough);

    rig.turn(CLEAR_SETTINGS - PASSTHROUGH);
    assert_eq!(rig.hw.row(1), "Clear Settings");
    rig.short_press();
    assert_eq!(rig.screen(), ("Clear Settings", "Clear settings?"));
    assert!(rig.svc.settings().passthrough, "nothing cleared before confirming");
    rig.short_press();

    assert_eq!(rig.screen(), ("Service Menu", "Clear Settings"));
    assert_eq!(rig.svc.settings(), &ControllerSettings::default());
    assert_eq!(rig.hw.store.load().unwrap(), ControllerSettings::default());
    assert!(rig.sink.events.contains(&AppEvent::FactoryReset));
    assert_eq!(rig.svc.mode(), Mode::Menu);
}

#[test]
fn restart_bootloader_shows_notice() {
    let mut rig = Rig::new();
    rig.turn(-1);
    rig.short_press();
    rig.turn(1);
    assert_eq!(rig.hw.row(1), "Bootloader");
    rig.short_press();
    assert_eq!(rig.screen(), ("Bootloader", "Reboot to BL?"));
    assert!(rig.hw.restarts.is_empty());
    rig.short_press();

    assert_eq!(rig.hw.restarts, vec![RestartKind::Bootloader]);
    assert_eq!(rig.hw.row(0), "Jump to BL");
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::RestartRequested(RestartKind::Bootloader)));
}

#[test]
fn escape_at_clear_prompt_keeps_settings() {
    let mut rig = Rig::new();
    rig.turn(PASSTHROUGH);
    rig.short_press();
    rig.turn(1);
    rig.short_press();
    let stored = writes(&rig);

    rig.turn(CLEAR_SETTINGS - PASSTHROUGH);
    rig.short_press();
    assert!(rig.svc.menu().is_confirming());
    rig.long_press();

    assert!(!rig.svc.menu().is_confirming());
    assert_eq!(rig.screen(), ("Service Menu", "Clear Settings"));
    assert!(rig.svc.settings().passthrough);
    assert!(rig.hw.store.load().unwrap().passthrough);
    assert_eq!(writes(&rig), stored);
    assert!(!rig.sink.events.contains(&AppEvent::FactoryReset));
}

#[test]
fn escape_at_restart_prompt_does_not_restart() {
    let mut rig = Rig::new();
    rig.turn(-1);
    rig.short_press();
    rig.short_press();
    assert_eq!(rig.screen(), ("Main System", "Restart?"));
    rig.long_press();

    assert!(rig.hw.restarts.is_empty());
    assert_eq!(rig.screen(), ("Restart", "Main System"));
}

#[test]
fn escape_at_root_redraws_root() {
    let mut rig = Rig::new();
    rig.turn(1);
    rig.long_press();
    rig.tick();
    assert!(rig.svc.menu().is_active());
    assert_eq!(rig.screen(), ("Service Menu", "Button Test"));
}

#[test]
fn stored_settings_are_loaded_at_start() {
    let mut hw = MockBoard::new();
    let mut saved = ControllerSettings::default();
    saved.passthrough = true;
    saved.calibration.zero_level = 80;
    hw.store.save(&saved).unwrap();

    let rig = Rig::with_board(hw);
    assert_eq!(rig.svc.settings(), &saved);
    assert_eq!(rig.hw.coefficients.zero_level, 80, "sensor seeded from settings");
}

#[test]
fn corrupted_record_falls_back_to_defaults() {
    let mut hw = MockBoard::new();
    hw.store
        .storage_mut()
        .write(SETTINGS_NAMESPACE, SETTINGS_KEY, &[0xEE, 0x01, 0x02])
        .unwrap();

    let rig = Rig::with_board(hw);
    assert_eq!(rig.svc.settings(), &ControllerSettings::default());
}
