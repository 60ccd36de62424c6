//! Per-cycle readings and actuator states.
//!
//! A measurement that could not be taken is `None`; callers must branch
//! on it before use.  Nothing here outlives a process restart.

use core::fmt;

/// One sample of every sensor, taken once per cycle and then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    /// Ranger distance to the fill surface (cm).
    pub distance_cm: Option<f32>,
    /// Ambient temperature (°C).
    pub temperature_c: Option<f32>,
    /// Relative humidity (%).
    pub humidity_pct: Option<f32>,
}

/// Lid position.  Starts `Closed` on every boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LidState {
    Open,
    #[default]
    Closed,
}

impl LidState {
    /// Status-line token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for LidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicator light.  Starts `Off` on every boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightState {
    On,
    #[default]
    Off,
}

impl LightState {
    /// Status-line token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
