//! Status reporter.
//!
//! The outbound status line is a contract with downstream dashboards:
//!
//! ```text
//! Temp: 25.0C, Hum: 90.0%, Dist: 5.0cm, Fill: 100%, Lid: closed, LED: on
//! ```
//!
//! Field order and labels must not change.  A missing measurement renders
//! as `error` in place of the number and unit; a missing fill level renders
//! as `unavailable`.

use core::fmt;

use super::fill::FillLevel;
use super::model::{LidState, LightState, SensorReading};

/// Snapshot of everything the status line reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub distance_cm: Option<f32>,
    pub fill: FillLevel,
    pub lid: LidState,
    pub light: LightState,
}

impl StatusReport {
    pub fn new(reading: &SensorReading, fill: FillLevel, lid: LidState, light: LightState) -> Self {
        Self {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
            distance_cm: reading.distance_cm,
            fill,
            lid,
            light,
        }
    }

    /// The UTF-8 payload published on the status topic.
    pub fn to_payload(&self) -> String {
        self.to_string()
    }
}

const ERROR_MARKER: &str = "error";

/// One decimal followed by `unit`, or the error marker.
struct Measure(Option<f32>, &'static str);

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.1}{}", v, self.1),
            None => f.write_str(ERROR_MARKER),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temp: {}, Hum: {}, Dist: {}, Fill: {}, Lid: {}, LED: {}",
            Measure(self.temperature_c, "C"),
            Measure(self.humidity_pct, "%"),
            Measure(self.distance_cm, "cm"),
            self.fill,
            self.lid,
            self.light,
        )
    }
}
