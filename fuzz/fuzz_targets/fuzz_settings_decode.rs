//! Fuzz target: `settings_store::decode`
//!
//! Arbitrary blobs must never panic the decoder, and anything it accepts
//! must pass validation and re-encode to a blob that decodes to the same
//! record.
//!
//! cargo fuzz run fuzz_settings_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use svcmenu::adapters::settings_store::{decode, encode, MAX_RECORD_SIZE};
use svcmenu::config::validate;

fuzz_target!(|data: &[u8]| {
    if let Ok(settings) = decode(data) {
        assert!(validate(&settings).is_ok(), "decoder accepted an invalid record");

        let mut buf = [0u8; MAX_RECORD_SIZE];
        let len = encode(&settings, &mut buf).expect("accepted record must re-encode");
        assert_eq!(decode(&buf[..len]).ok(), Some(settings));
    }
});
