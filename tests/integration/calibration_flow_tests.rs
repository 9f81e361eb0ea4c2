//! Touch-strip calibration driven through the menu and the control loop.

use crate::mock_hw::{Rig, SAMPLED};

use svcmenu::app::events::AppEvent;
use svcmenu::app::ports::SettingsPort;
use svcmenu::calibration::CalibrationStage;
use svcmenu::config::CalibrationCoefficients;
use svcmenu::drivers::button::SwitchState;
use svcmenu::fsm::Mode;

/// Enter calibration from the root menu and run the entry tick.
fn enter_calibration() -> Rig {
    let mut rig = Rig::new();
    rig.turn(2);
    assert_eq!(rig.hw.row(1), "Touch Calib.");
    rig.run_item();
    assert_eq!(rig.svc.mode(), Mode::CalibrationRun);
    rig.tick();
    rig
}

/// Press select and let the following prompt stage run.
fn sample(rig: &mut Rig) {
    rig.short_press();
    rig.tick();
}

#[test]
fn full_procedure_persists_sensor_coefficients() {
    let mut rig = enter_calibration();
    assert_eq!(rig.screen(), ("Touch Calib.", "Calib left"));
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::SampleLeft);

    sample(&mut rig);
    assert_eq!(rig.hw.row(1), "Calib right");
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::SampleRight);

    sample(&mut rig);
    assert_eq!(rig.hw.row(1), "Calib zero x3");
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::SampleZero);

    for _ in 0..3 {
        rig.short_press();
    }
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::Commit);
    rig.tick();
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::Done);
    assert_eq!(rig.hw.row(1), "Done. Press SEL");

    let stored = rig.hw.store.load().unwrap();
    assert_eq!(stored.calibration, SAMPLED);
    assert_eq!(stored.calibration, rig.hw.coefficients);
    assert_eq!(rig.svc.settings().calibration, SAMPLED);
    assert!(rig.sink.events.contains(&AppEvent::CalibrationCommitted(SAMPLED)));
    assert_eq!(rig.hw.zero_calls, vec![true, false, false]);

    rig.short_press();
    assert_eq!(rig.svc.mode(), Mode::Menu);
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::PromptLeft);
    rig.tick();
    assert_eq!(rig.screen(), ("Service Menu", "Button Test"));
}

#[test]
fn zero_stage_needs_three_cumulative_successes() {
    let mut rig = enter_calibration();
    sample(&mut rig);
    sample(&mut rig);
    rig.hw.sample_results.extend([true, false, true, false]);

    let mut stages = vec![rig.svc.calibration_stage()];
    for _ in 0..4 {
        rig.short_press();
        stages.push(rig.svc.calibration_stage());
    }
    assert!(stages.iter().all(|s| *s == CalibrationStage::SampleZero));
    assert_eq!(rig.svc.zero_samples(), 2);

    rig.short_press();
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::Commit);
    assert_eq!(rig.hw.zero_calls, vec![true, false, false, false, false]);

    let rejected = rig
        .sink
        .events
        .iter()
        .filter(|e| **e == AppEvent::CalibrationSampleRejected(CalibrationStage::SampleZero))
        .count();
    assert_eq!(rejected, 2);
}

#[test]
fn failed_first_zero_sample_restarts_accumulation() {
    let mut rig = enter_calibration();
    sample(&mut rig);
    sample(&mut rig);
    rig.hw.sample_results.extend([false, true]);

    rig.short_press();
    rig.short_press();
    assert_eq!(rig.hw.zero_calls, vec![true, true]);
    assert_eq!(rig.svc.zero_samples(), 1);
}

#[test]
fn rejected_sample_consumes_press_and_stays() {
    let mut rig = enter_calibration();
    rig.hw.sample_results.push_back(false);

    rig.short_press();
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::SampleLeft);
    assert_eq!(rig.svc.switch_state(), SwitchState::Idle, "press consumed");
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::CalibrationSampleRejected(CalibrationStage::SampleLeft)));

    rig.short_press();
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::PromptRight);
}

#[test]
fn long_press_aborts_without_persisting() {
    let mut rig = enter_calibration();
    sample(&mut rig);
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::SampleRight);

    rig.long_press();
    assert_eq!(rig.svc.mode(), Mode::Menu);
    assert_eq!(rig.svc.calibration_stage(), CalibrationStage::PromptLeft);
    assert_eq!(rig.svc.zero_samples(), 0);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::CalibrationAborted(CalibrationStage::SampleRight)));
    assert!(rig.hw.store.load().is_err(), "nothing saved");
    assert_eq!(
        rig.svc.settings().calibration,
        CalibrationCoefficients::default()
    );
}

#[test]
fn stage_never_decreases_until_exit() {
    let mut rig = enter_calibration();
    rig.hw.sample_results.extend([false, true, false, true, true, false, true, true]);

    let mut last = rig.svc.calibration_stage();
    while rig.svc.mode() == Mode::CalibrationRun {
        rig.short_press();
        let now = rig.svc.calibration_stage();
        if rig.svc.mode() == Mode::CalibrationRun {
            assert!(now >= last, "{:?} -> {:?}", last, now);
        }
        last = now;
        rig.tick();
    }
    assert_eq!(rig.hw.store.load().unwrap().calibration, SAMPLED);
}
