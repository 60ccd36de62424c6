//! Automatic alert policy.
//!
//! The indicator light is on whenever the bin is nearly full or liquid is
//! suspected.  The policy is re-evaluated every cycle, not only on change,
//! so the light converges even after a stale remote command.
//!
//! | Trigger | Condition                                  |
//! |---------|--------------------------------------------|
//! | Full    | fill known and `fill >= fill_threshold`    |
//! | Liquid  | humidity known and `humidity > threshold`  |
//!
//! An unavailable fill level never triggers `Full` but does not mask
//! `Liquid`.

use core::fmt;

use crate::config::SystemConfig;

use super::fill::FillLevel;

/// Why the policy wants the light on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCause {
    Full,
    Liquid,
    FullAndLiquid,
}

impl fmt::Display for AlertCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("bin almost full"),
            Self::Liquid => f.write_str("possible liquid detected"),
            Self::FullAndLiquid => f.write_str("bin almost full AND possible liquid"),
        }
    }
}

/// Threshold pair driving the light.
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    /// Inclusive.
    fill_threshold: u8,
    /// Exclusive.
    humidity_threshold: f32,
}

impl AlertPolicy {
    pub fn new(fill_threshold: u8, humidity_threshold: f32) -> Self {
        Self {
            fill_threshold,
            humidity_threshold,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.fill_alert_percent, config.humidity_alert_percent)
    }

    pub fn is_full(&self, fill: FillLevel) -> bool {
        fill.percent().is_some_and(|p| p >= self.fill_threshold)
    }

    pub fn liquid_detected(&self, humidity_pct: Option<f32>) -> bool {
        humidity_pct.is_some_and(|h| h > self.humidity_threshold)
    }

    /// `Some(cause)` when the light should be on, `None` when off.
    pub fn evaluate(&self, fill: FillLevel, humidity_pct: Option<f32>) -> Option<AlertCause> {
        match (self.is_full(fill), self.liquid_detected(humidity_pct)) {
            (true, true) => Some(AlertCause::FullAndLiquid),
            (true, false) => Some(AlertCause::Full),
            (false, true) => Some(AlertCause::Liquid),
            (false, false) => None,
        }
    }
}
