//! Inbound commands to the application service.
//!
//! Produced by the menu's run-action fields (via the settings bridge) or
//! injected directly by the host through
//! [`ServiceMenu::handle_command`](super::service::ServiceMenu::handle_command).

use super::ports::RestartKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Show the live button-matrix snapshot.
    EnterButtonTest,

    /// Show the live touch-strip readout.
    EnterPositionTest,

    /// Run the guided touch-strip calibration.
    EnterCalibration,

    /// Reset the settings record to factory defaults and persist it.
    FactoryReset,

    /// Restart the board. Does not return on the device.
    Restart(RestartKind),
}
