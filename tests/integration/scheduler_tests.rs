//! Mode scheduling: start-up, diagnostics entry/exit and refresh cadence.

use crate::mock_hw::{MockBoard, Rig, TICK_MS};

use svcmenu::app::commands::AppCommand;
use svcmenu::app::events::AppEvent;
use svcmenu::app::ports::PositionReading;
use svcmenu::drivers::button::SwitchState;
use svcmenu::fsm::Mode;
use svcmenu::menu::FieldId;

#[test]
fn start_draws_root_menu_and_clears_latch() {
    let rig = Rig::new();
    assert_eq!(rig.svc.mode(), Mode::Menu);
    assert!(rig.hw.latch_cleared);
    assert_eq!(rig.screen(), ("Service Menu", "Button Test"));
    assert_eq!(rig.sink.events.first(), Some(&AppEvent::Started(Mode::Menu)));
}

#[test]
fn startup_hold_produces_no_action() {
    let mut hw = MockBoard::new();
    hw.switch_low = true;
    let mut rig = Rig::with_board(hw);

    // Held well past the long-press threshold, then released.
    rig.idle(70);
    rig.hw.switch_low = false;
    rig.idle(3);

    assert_eq!(rig.svc.switch_state(), SwitchState::Idle);
    assert_eq!(rig.svc.mode(), Mode::Menu);
    assert_eq!(rig.svc.menu().current_item(), Some(FieldId::ButtonTest));
    assert_eq!(rig.screen(), ("Service Menu", "Button Test"));

    // The block is one-shot: the next press is handled normally.
    rig.short_press();
    assert_eq!(rig.screen(), ("Button Test", "Press SEL"));
    rig.short_press();
    assert_eq!(rig.svc.mode(), Mode::ButtonTest);
}

#[test]
fn button_test_shows_title_and_live_mask() {
    let mut rig = Rig::new();
    rig.hw.buttons = 0xFFFE;
    rig.run_item();
    assert_eq!(rig.svc.mode(), Mode::ButtonTest);
    assert!(rig.svc.is_entry_pending());

    rig.tick();
    assert!(!rig.svc.is_entry_pending());
    assert_eq!(rig.screen(), ("Button Test", "X---------------"));

    rig.hw.buttons = 0x7FFF;
    rig.idle(10);
    assert_eq!(rig.hw.row(1), "---------------X");
}

#[test]
fn diagnostics_refresh_every_100ms() {
    let mut rig = Rig::new();
    rig.run_item();
    rig.tick();
    assert_eq!(rig.hw.scans, 1, "first refresh is immediate");

    rig.idle((100 / TICK_MS - 1) as usize);
    assert_eq!(rig.hw.scans, 1);
    rig.tick();
    assert_eq!(rig.hw.scans, 2);
}

#[test]
fn short_press_in_button_test_returns_to_menu() {
    let mut rig = Rig::new();
    rig.run_item();
    rig.tick();
    assert_eq!(rig.svc.mode(), Mode::ButtonTest);

    rig.hw.rotary = 3;
    rig.short_press();
    assert_eq!(rig.svc.mode(), Mode::Menu);
    assert_eq!(rig.svc.switch_state(), SwitchState::Idle);

    rig.tick();
    assert_eq!(rig.hw.rotary, 0);
    assert_eq!(rig.screen(), ("Service Menu", "Button Test"));

    // Re-entering prints the title again.
    let clears = rig.hw.clears;
    rig.run_item();
    rig.tick();
    assert!(rig.hw.clears > clears);
    assert_eq!(rig.hw.row(0), "Button Test");
}

#[test]
fn long_press_also_leaves_diagnostics() {
    let mut rig = Rig::new();
    rig.turn(1);
    rig.run_item();
    rig.tick();
    assert_eq!(rig.svc.mode(), Mode::PositionTest);

    rig.long_press();
    assert_eq!(rig.svc.mode(), Mode::Menu);
}

#[test]
fn position_test_formats_reading() {
    let mut rig = Rig::new();
    rig.hw.reading = PositionReading {
        pos1: Some(512),
        pos2: None,
        left_adc: 600,
        right_adc: 30,
    };
    rig.handle(AppCommand::EnterPositionTest);
    rig.tick();

    assert_eq!(rig.screen(), ("Touch Test", "512 - 600 30"));
    assert!(rig.sink.events.contains(&AppEvent::ModeChanged {
        from: Mode::Menu,
        to: Mode::PositionTest,
    }));
}

#[test]
fn long_press_survives_clock_wrap() {
    let mut rig = Rig::new();
    rig.now = u32::MAX - 200;
    rig.turn(-1);
    rig.short_press();
    assert_eq!(rig.svc.menu().current_item(), Some(FieldId::RestartMain));

    rig.long_press();
    assert!(rig.now < 1_000, "clock wrapped during the hold");
    assert_eq!(rig.svc.menu().current_item(), Some(FieldId::RestartMenu));
}
