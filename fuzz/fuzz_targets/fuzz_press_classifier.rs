//! Fuzz target: `PressClassifier::sample`
//!
//! Each input byte is one loop iteration: bit 7 is the line level (1 =
//! low), the low 7 bits the milliseconds elapsed since the previous
//! sample. A long press must never be reported unless the line was held
//! low for more than the threshold, and a ready press is delivered once.
//!
//! cargo fuzz run fuzz_press_classifier

#![no_main]

use libfuzzer_sys::fuzz_target;
use svcmenu::drivers::button::{Press, PressClassifier, LONG_PRESS_THRESHOLD_MS};

fuzz_target!(|data: &[u8]| {
    let mut press = PressClassifier::new();
    let mut now: u32 = u32::MAX - 1_000;
    let mut low_since: Option<u32> = None;
    let mut longest_low: u32 = 0;

    for &byte in data {
        now = now.wrapping_add(u32::from(byte & 0x7f));
        let low = byte & 0x80 != 0;

        if low {
            let start = *low_since.get_or_insert(now);
            longest_low = longest_low.max(now.wrapping_sub(start));
        } else {
            low_since = None;
        }

        press.sample(low, now);

        if let Some(kind) = press.take() {
            if kind == Press::Long {
                assert!(longest_low > LONG_PRESS_THRESHOLD_MS, "long press without a long hold");
            }
            assert_eq!(press.take(), None, "ready press delivered twice");
            longest_low = 0;
        }
    }
});
