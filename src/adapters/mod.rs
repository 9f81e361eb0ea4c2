//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements          | Connects to                   |
//! |------------------|---------------------|-------------------------------|
//! | `hardware`       | Board (all ports)   | LCD, encoder, SPI, ADC, reset |
//! | `log_sink`       | EventSink           | Serial log output             |
//! | `nvs`            | StoragePort         | NVS / in-memory store         |
//! | `settings_store` | SettingsPort        | Any StoragePort               |
//! | `time`           |                     | ESP32 system timer            |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod settings_store;
pub mod time;
