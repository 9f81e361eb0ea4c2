//! Platform restart.
//!
//! * **Main system**: `esp_restart()`.
//! * **Bootloader**: force the ROM into download mode for the next boot
//!   (`RTC_CNTL_OPTION1_REG`, bit 0), then `esp_restart()`.
//!
//! Neither returns on the device. The host build logs the request and
//! returns so tests can observe it.

use log::warn;

use crate::app::ports::{RestartKind, RestartPort};

/// `RTC_CNTL_OPTION1_REG` on the ESP32-S3.
#[cfg(target_os = "espidf")]
const RTC_CNTL_OPTION1_REG: usize = 0x6000_812C;
/// `RTC_CNTL_FORCE_DOWNLOAD_BOOT` bit.
#[cfg(target_os = "espidf")]
const FORCE_DOWNLOAD_BOOT: u32 = 1;

#[derive(Debug, Default)]
pub struct EspRestart;

impl EspRestart {
    pub fn new() -> Self {
        Self
    }
}

impl RestartPort for EspRestart {
    #[cfg(target_os = "espidf")]
    fn restart(&mut self, kind: RestartKind) {
        warn!("restarting: {:?}", kind);
        if kind == RestartKind::Bootloader {
            // SAFETY: documented RTC register, written once right before reset.
            unsafe {
                core::ptr::write_volatile(RTC_CNTL_OPTION1_REG as *mut u32, FORCE_DOWNLOAD_BOOT);
            }
        }
        // SAFETY: no preconditions; does not return.
        unsafe { esp_idf_svc::sys::esp_restart() };
        #[allow(clippy::empty_loop)]
        loop {}
    }

    #[cfg(not(target_os = "espidf"))]
    fn restart(&mut self, kind: RestartKind) {
        warn!("restart(sim): {:?} requested, ignoring", kind);
    }
}
