//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns the ranger and the climate reader and produces one
//! [`SensorReading`] per cycle.  Failures never escape as errors; they
//! become `None` fields and a log line.

pub mod climate;
pub mod ultrasonic;

use log::warn;

use crate::app::model::SensorReading;
use crate::error::SensorError;
use climate::{ClimateReader, ClimateSample};

/// Anything that can produce a one-shot distance in centimetres.
pub trait Ranging {
    fn measure(&mut self) -> Result<f32, SensorError>;
}

/// Anything that can produce a one-shot temperature/humidity sample.
pub trait ClimateSensor {
    fn read(&mut self) -> Result<ClimateSample, SensorError>;
}

/// Aggregates all sensor drivers and produces a unified reading.
pub struct SensorHub<R, C> {
    ranger: R,
    climate: ClimateReader<C>,
}

impl<R: Ranging, C: ClimateSensor> SensorHub<R, C> {
    pub fn new(ranger: R, climate: C) -> Self {
        Self {
            ranger,
            climate: ClimateReader::new(climate),
        }
    }

    /// Sample every sensor exactly once.
    pub fn read_all(&mut self) -> SensorReading {
        let distance_cm = match self.ranger.measure() {
            Ok(d) => Some(d),
            Err(e) => {
                warn!("Ranger read failed: {}", e);
                None
            }
        };
        let (temperature_c, humidity_pct) = self.climate.measure();

        SensorReading {
            distance_cm,
            temperature_c,
            humidity_pct,
        }
    }
}
