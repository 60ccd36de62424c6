//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to              |
//! |------------|--------------------|--------------------------|
//! | `hardware` | SensorPort         | Ranger, DHT22            |
//! |            | ActuatorPort       | Lid servo PWM, LED GPIO  |
//! | `log_sink` | EventSink          | Serial log output        |
//! | `time`     | TimePort           | ESP32 system timer       |
//! | `wifi`     | NetworkPort        | ESP-IDF WiFi STA         |
//! | `mqtt`     | MessageLink        | ESP-IDF MQTT client      |
//! | `platform` | PlatformPort       | FreeRTOS delay, TWDT     |

pub mod hardware;
pub mod log_sink;
pub mod time;

#[cfg(target_os = "espidf")]
pub mod mqtt;
#[cfg(target_os = "espidf")]
pub mod platform;
#[cfg(target_os = "espidf")]
pub mod wifi;
