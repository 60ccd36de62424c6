//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches sensor or actuator pins.  Driver errors are
//! logged here; the domain only ever sees open-loop actuation.

use core::fmt::Debug;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::error;

use crate::app::model::{LidState, LightState, SensorReading};
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::indicator_led::IndicatorLed;
use crate::drivers::lid_servo::LidServo;
use crate::sensors::{ClimateSensor, Ranging, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R, C, S, L> {
    sensor_hub: SensorHub<R, C>,
    lid: LidServo<S>,
    light: IndicatorLed<L>,
}

impl<R, C, S, L> HardwareAdapter<R, C, S, L>
where
    R: Ranging,
    C: ClimateSensor,
    S: SetDutyCycle,
    L: OutputPin,
{
    pub fn new(sensor_hub: SensorHub<R, C>, lid: LidServo<S>, light: IndicatorLed<L>) -> Self {
        Self {
            sensor_hub,
            lid,
            light,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<R, C, S, L> SensorPort for HardwareAdapter<R, C, S, L>
where
    R: Ranging,
    C: ClimateSensor,
{
    fn read_all(&mut self) -> SensorReading {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<R, C, S, L> ActuatorPort for HardwareAdapter<R, C, S, L>
where
    S: SetDutyCycle,
    S::Error: Debug,
    L: OutputPin,
    L::Error: Debug,
{
    fn drive_lid(&mut self, target: LidState) {
        if let Err(e) = self.lid.drive(target) {
            error!("Lid servo: failed to drive {}: {:?}", target, e);
        }
    }

    fn set_light(&mut self, target: LightState) {
        if let Err(e) = self.light.set(target) {
            error!("Indicator light: failed to switch {}: {:?}", target, e);
        }
    }
}
