//! System configuration parameters
//!
//! All tunable parameters for the SmartBin controller.  Defaults match the
//! deployed bin; a partial JSON overlay can replace any subset of them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::inbound::{MAX_PAYLOAD_LEN, MAX_TOPIC_LEN};

/// Wire tokens for the four remote commands.
///
/// These are an integration contract with the remote controller and must
/// stay stable once deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandTokens {
    pub open_lid: String,
    pub close_lid: String,
    pub light_on: String,
    pub light_off: String,
}

impl Default for CommandTokens {
    fn default() -> Self {
        Self {
            open_lid: "tabre".into(),
            close_lid: "tfecha".into(),
            light_on: "lon".into(),
            light_off: "loff".into(),
        }
    }
}

impl CommandTokens {
    fn all(&self) -> [&str; 4] {
        [&self.open_lid, &self.close_lid, &self.light_on, &self.light_off]
    }
}

/// Ranger calibration, in centimetres from the sensor face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Distance measured when the bin is empty.
    pub empty_distance_cm: f32,
    /// Distance measured when the bin is full.
    pub full_distance_cm: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            empty_distance_cm: 50.0,
            full_distance_cm: 5.0,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Network ---
    pub wifi_ssid: String,
    pub wifi_password: String,
    /// Association polls before giving up and restarting.
    pub wifi_connect_attempts: u32,
    pub wifi_poll_interval_ms: u32,

    // --- Broker ---
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_user: Option<String>,
    pub mqtt_password: Option<String>,
    pub client_id: String,
    /// Topic the bin subscribes to for remote commands.
    pub command_topic: String,
    /// Topic the bin publishes its status line to.
    pub status_topic: String,
    pub command_tokens: CommandTokens,

    // --- Fill / alerts ---
    pub calibration: Calibration,
    /// Fill percentage at or above which the light turns on (inclusive).
    pub fill_alert_percent: u8,
    /// Relative humidity above which liquid is assumed (exclusive).
    pub humidity_alert_percent: f32,

    // --- Timing ---
    /// Polling cycle period (milliseconds)
    pub cycle_interval_ms: u32,
    /// Per-edge echo wait limit (microseconds)
    pub echo_timeout_us: u32,
    /// Pause before restarting after a broker failure (milliseconds)
    pub restart_pause_ms: u32,
    /// Pause before restarting after a Wi-Fi failure (milliseconds)
    pub wifi_restart_pause_ms: u32,
    /// Task watchdog period (milliseconds)
    pub watchdog_timeout_ms: u32,

    /// Upper bound on inbound commands interpreted per cycle.
    pub max_commands_per_cycle: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Network
            wifi_ssid: "Wokwi-GUEST".into(),
            wifi_password: String::new(),
            wifi_connect_attempts: 100,
            wifi_poll_interval_ms: 100, // 10 s total

            // Broker
            mqtt_host: "broker.mqttdashboard.com".into(),
            mqtt_port: 1883,
            mqtt_user: None,
            mqtt_password: None,
            client_id: "FILL".into(),
            command_topic: "lixeira/comandos".into(),
            status_topic: "lixeira/status".into(),
            command_tokens: CommandTokens::default(),

            // Fill / alerts
            calibration: Calibration::default(),
            fill_alert_percent: 80,
            humidity_alert_percent: 85.0,

            // Timing
            cycle_interval_ms: 5000,
            echo_timeout_us: 30_000,
            restart_pause_ms: 5000,
            wifi_restart_pause_ms: 2000,
            watchdog_timeout_ms: 15_000, // 3 cycles

            max_commands_per_cycle: 8,
        }
    }
}

impl SystemConfig {
    /// Overlay a (possibly partial) JSON document on the defaults and
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Build-time configuration: the `SMARTBIN_CONFIG` JSON overlay if one
    /// was supplied to the compiler, otherwise the defaults.
    pub fn from_build_env() -> Self {
        match option_env!("SMARTBIN_CONFIG") {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("SMARTBIN_CONFIG rejected ({}), using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_ssid(&self.wifi_ssid)?;
        validate_password(&self.wifi_password)?;
        if self.mqtt_host.is_empty() {
            return Err(ConfigError::Invalid("mqtt_host must not be empty"));
        }
        if self.client_id.is_empty() {
            return Err(ConfigError::Invalid("client_id must not be empty"));
        }
        if self.command_topic.is_empty() || self.status_topic.is_empty() {
            return Err(ConfigError::Invalid("topics must not be empty"));
        }
        // Inbound messages are buffered at fixed capacity; a longer topic
        // or token could never be received.
        if self.command_topic.len() > MAX_TOPIC_LEN {
            return Err(ConfigError::Invalid("command_topic exceeds the inbound topic buffer"));
        }
        let tokens = self.command_tokens.all();
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(ConfigError::Invalid("command tokens must not be empty"));
        }
        if tokens.iter().any(|t| t.len() > MAX_PAYLOAD_LEN) {
            return Err(ConfigError::Invalid("command tokens exceed the inbound payload buffer"));
        }
        for (i, a) in tokens.iter().enumerate() {
            if tokens[i + 1..].contains(a) {
                return Err(ConfigError::Invalid("command tokens must be distinct"));
            }
        }
        let cal = &self.calibration;
        if !(cal.full_distance_cm >= 0.0 && cal.empty_distance_cm > cal.full_distance_cm) {
            return Err(ConfigError::Invalid(
                "empty_distance_cm must exceed full_distance_cm",
            ));
        }
        if self.fill_alert_percent > 100 {
            return Err(ConfigError::Invalid("fill_alert_percent must be 0-100"));
        }
        if !(0.0..=100.0).contains(&self.humidity_alert_percent) {
            return Err(ConfigError::Invalid("humidity_alert_percent must be 0-100"));
        }
        if self.cycle_interval_ms == 0 || self.echo_timeout_us == 0 {
            return Err(ConfigError::Invalid("intervals must be non-zero"));
        }
        if self.watchdog_timeout_ms <= self.cycle_interval_ms {
            return Err(ConfigError::Invalid(
                "watchdog_timeout_ms must exceed cycle_interval_ms",
            ));
        }
        if self.max_commands_per_cycle == 0 {
            return Err(ConfigError::Invalid("max_commands_per_cycle must be non-zero"));
        }
        Ok(())
    }

    /// `mqtt://host:port` URL for the broker.
    pub fn broker_url(&self) -> String {
        format!("mqtt://{}:{}", self.mqtt_host, self.mqtt_port)
    }
}

// ───────────────────────────────────────────────────────────────
// Wi-Fi credential validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConfigError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConfigError::Invalid("wifi_ssid must be 1-32 printable ASCII bytes"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConfigError> {
    // Open networks carry no password.
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConfigError::Invalid("wifi_password must be 8-64 bytes or empty"));
    }
    Ok(())
}
