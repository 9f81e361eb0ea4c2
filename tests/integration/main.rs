//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the full service menu
//! (press classifier → mode machine → menu engine → settings store)
//! against the mock board. All tests run on the host with no real
//! hardware required.

mod calibration_flow_tests;
mod menu_flow_tests;
mod mock_hw;
mod scheduler_tests;
