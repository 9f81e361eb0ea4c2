//! Guided touch-strip calibration.
//!
//! ```text
//!   0 PromptLeft ─▶ 1 SampleLeft ─(SEL ok)─▶ 2 PromptRight ─▶ 3 SampleRight ─(SEL ok)─▶
//!   4 PromptZero ─▶ 5 SampleZero ─(3× SEL ok)─▶ 6 Commit ─▶ 7 Done ─(SEL)─▶ finished
//! ```
//!
//! Prompt stages advance on the next step without consuming input. Sample
//! stages consume every short press whether or not the sample is usable;
//! a rejected sample leaves the stage unchanged. A long press aborts from
//! any stage. Stage 6 is the only stage that produces coefficients to
//! persist.

use crate::app::ports::PositionSensorPort;
use crate::config::CalibrationCoefficients;
use crate::drivers::button::{Press, PressClassifier};

/// Successful zero-level samples needed before committing.
pub const ZERO_SAMPLES_REQUIRED: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum CalibrationStage {
    #[default]
    PromptLeft = 0,
    SampleLeft = 1,
    PromptRight = 2,
    SampleRight = 3,
    PromptZero = 4,
    SampleZero = 5,
    Commit = 6,
    Done = 7,
}

impl CalibrationStage {
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The following stage; `Done` is terminal.
    fn next(self) -> Self {
        match self {
            Self::PromptLeft => Self::SampleLeft,
            Self::SampleLeft => Self::PromptRight,
            Self::PromptRight => Self::SampleRight,
            Self::SampleRight => Self::PromptZero,
            Self::PromptZero => Self::SampleZero,
            Self::SampleZero => Self::Commit,
            Self::Commit | Self::Done => Self::Done,
        }
    }
}

/// What the caller must do after one [`CalibrationProcedure::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing happened this iteration.
    Waiting,
    /// Show this prompt on the bottom row.
    Prompt(&'static str),
    /// A sample was taken and accepted.
    Accepted(CalibrationStage),
    /// A sample was taken and rejected; stage unchanged.
    Rejected(CalibrationStage),
    /// Persist these coefficients, then show [`DONE_PROMPT`].
    Commit(CalibrationCoefficients),
    /// Operator confirmed the final stage; return to the menu.
    Finished,
    /// Long press; return to the menu without persisting.
    Aborted(CalibrationStage),
}

pub const LEFT_PROMPT: &str = "Calib left";
pub const RIGHT_PROMPT: &str = "Calib right";
pub const ZERO_PROMPT: &str = "Calib zero x3";
pub const SAVING_PROMPT: &str = "Saving...";
pub const DONE_PROMPT: &str = "Done. Press SEL";

#[derive(Debug, Clone, Default)]
pub struct CalibrationProcedure {
    stage: CalibrationStage,
    zero_samples: u8,
}

impl CalibrationProcedure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> CalibrationStage {
        self.stage
    }

    /// Successful zero-level samples so far in this session.
    pub fn zero_samples(&self) -> u8 {
        self.zero_samples
    }

    /// Back to stage 0 with no zero samples.
    pub fn reset(&mut self) {
        self.stage = CalibrationStage::PromptLeft;
        self.zero_samples = 0;
    }

    /// Run one iteration of the procedure.
    pub fn step<S: PositionSensorPort + ?Sized>(
        &mut self,
        press: &mut PressClassifier,
        sensor: &mut S,
    ) -> StepOutcome {
        if press.ready() == Some(Press::Long) {
            press.reset();
            let at = self.stage;
            self.reset();
            return StepOutcome::Aborted(at);
        }

        match self.stage {
            CalibrationStage::PromptLeft => self.prompt(LEFT_PROMPT),
            CalibrationStage::PromptRight => self.prompt(RIGHT_PROMPT),
            CalibrationStage::PromptZero => self.prompt(ZERO_PROMPT),

            CalibrationStage::SampleLeft => {
                self.sample(press, |s| s.calibrate_left(), sensor)
            }
            CalibrationStage::SampleRight => {
                self.sample(press, |s| s.calibrate_right(), sensor)
            }
            CalibrationStage::SampleZero => {
                let first = self.zero_samples == 0;
                self.sample(press, |s| s.calibrate_zero(first), sensor)
            }

            CalibrationStage::Commit => {
                self.stage = self.stage.next();
                StepOutcome::Commit(sensor.calibration())
            }

            CalibrationStage::Done => {
                if press.take() == Some(Press::Short) {
                    self.reset();
                    StepOutcome::Finished
                } else {
                    StepOutcome::Waiting
                }
            }
        }
    }

    fn prompt(&mut self, text: &'static str) -> StepOutcome {
        self.stage = self.stage.next();
        StepOutcome::Prompt(text)
    }

    fn sample<S: PositionSensorPort + ?Sized>(
        &mut self,
        press: &mut PressClassifier,
        take_sample: impl FnOnce(&mut S) -> bool,
        sensor: &mut S,
    ) -> StepOutcome {
        if press.take() != Some(Press::Short) {
            return StepOutcome::Waiting;
        }
        let at = self.stage;
        if !take_sample(sensor) {
            return StepOutcome::Rejected(at);
        }
        if at == CalibrationStage::SampleZero {
            self.zero_samples += 1;
            if self.zero_samples < ZERO_SAMPLES_REQUIRED {
                return StepOutcome::Accepted(at);
            }
        }
        self.stage = at.next();
        StepOutcome::Accepted(at)
    }
}
