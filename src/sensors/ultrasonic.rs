//! HC-SR04 ultrasonic distance ranger.
//!
//! A 10 µs trigger pulse makes the module emit a burst; the echo line then
//! stays HIGH for the round-trip time of the sound.  Both edge waits are
//! bounded by a monotonic deadline so a missing echo never blocks the loop.
//!
//! ## Timing
//!
//! The edge waits spin on the echo pin and the [`TimePort`] clock.  A
//! preempted sample stretches the measured width and the bin reads emptier
//! than it is, so both waits run inside one `critical_section::with`.  On
//! ESP-IDF that masks interrupts on the calling core for at most twice the
//! echo timeout, well inside the interrupt watchdog period.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::TimePort;
use crate::error::{EchoEdge, SensorError};

use super::Ranging;

/// Speed of sound at ~20 °C, in centimetres per microsecond.
const SOUND_CM_PER_US: f32 = 0.0343;

/// Settle time with the trigger held LOW before the pulse.
const TRIGGER_SETTLE_US: u32 = 2;
/// Width of the trigger pulse.
const TRIGGER_PULSE_US: u32 = 10;

/// Convert an echo-high duration to a one-way distance.
pub fn echo_to_cm(high_us: u64) -> f32 {
    high_us as f32 * SOUND_CM_PER_US / 2.0
}

pub struct UltrasonicRanger<Trig, Echo, D, T> {
    trig: Trig,
    echo: Echo,
    delay: D,
    clock: T,
    timeout_us: u32,
}

impl<Trig, Echo, D, T> UltrasonicRanger<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: TimePort,
{
    /// `timeout_us` bounds each of the two edge waits separately.
    pub fn new(trig: Trig, echo: Echo, delay: D, clock: T, timeout_us: u32) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us,
        }
    }

    /// Run one trigger/echo exchange and return the distance in cm.
    pub fn measure(&mut self) -> Result<f32, SensorError> {
        self.trigger()?;
        let width = critical_section::with(|_| -> Result<u64, SensorError> {
            let rise = self.wait_for(true, EchoEdge::Rising)?;
            let fall = self.wait_for(false, EchoEdge::Falling)?;
            Ok(fall.saturating_sub(rise))
        })?;
        Ok(echo_to_cm(width))
    }

    fn trigger(&mut self) -> Result<(), SensorError> {
        self.trig.set_low().map_err(|_| SensorError::PinFault)?;
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trig.set_high().map_err(|_| SensorError::PinFault)?;
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trig.set_low().map_err(|_| SensorError::PinFault)
    }

    /// Spin until the echo line reads `level`; returns the timestamp of
    /// the first sample at that level.
    fn wait_for(&mut self, level: bool, edge: EchoEdge) -> Result<u64, SensorError> {
        let start = self.clock.now_us();
        loop {
            let now = self.clock.now_us();
            if self.echo.is_high().map_err(|_| SensorError::PinFault)? == level {
                return Ok(now);
            }
            if now.saturating_sub(start) > u64::from(self.timeout_us) {
                return Err(SensorError::EchoTimeout { edge });
            }
        }
    }
}

impl<Trig, Echo, D, T> Ranging for UltrasonicRanger<Trig, Echo, D, T>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    T: TimePort,
{
    fn measure(&mut self) -> Result<f32, SensorError> {
        UltrasonicRanger::measure(self)
    }
}
