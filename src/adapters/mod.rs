//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                          | Connects to              |
//! |------------|-------------------------------------|--------------------------|
//! | `hardware` | ClimatePort, ScalePort, ActuatorPort | SHT31, HX711, GPIO lines |
//! | `log_sink` | EventSink                           | Serial log output        |
//! | `time`     | ClockPort                           | FreeRTOS delay, esp_timer |

pub mod hardware;
pub mod log_sink;
pub mod time;
