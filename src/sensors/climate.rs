//! DHT22 / AM2302 temperature and humidity sensor.
//!
//! Single-wire, open-drain protocol:
//!
//! ```text
//! host:   ‾‾‾\________/‾‾‾‾  (≥1 ms low start signal, then release)
//! sensor:               \_80µs_/‾80µs‾\ then 40 bits:
//! bit:    \_50µs_/‾26–28µs‾\  = 0      \_50µs_/‾70µs‾\  = 1
//! ```
//!
//! Frame: humidity ×10 (u16 BE), temperature ×10 (u16 BE, bit 15 = sign),
//! checksum = low byte of the sum of the first four bytes.
//!
//! [`Dht22`] does the bit-banging and returns typed errors; [`ClimateReader`]
//! is what the rest of the firmware uses and never fails: a bad transaction
//! becomes `(None, None)` and a warning.
//!
//! Unlike the ranger, the bit waits here are not run with interrupts
//! masked.  A preempted bit corrupts the frame, and the checksum rejects it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::TimePort;
use crate::error::SensorError;

use super::ClimateSensor;

/// Start signal hold time.  Datasheet minimum is 1 ms.
const START_LOW_US: u32 = 1_100;
/// Upper bound for any single level in the response or a data bit.
const LEVEL_TIMEOUT_US: u64 = 100;
/// HIGH longer than this encodes a `1`.
const ONE_THRESHOLD_US: u64 = 40;

/// One successful measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Validate and decode a raw 5-byte frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<ClimateSample, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = u16::from_be_bytes([frame[0], frame[1]]);
    let magnitude = u16::from_be_bytes([frame[2] & 0x7F, frame[3]]);
    let mut temperature = f32::from(magnitude) / 10.0;
    if frame[2] & 0x80 != 0 {
        temperature = -temperature;
    }

    Ok(ClimateSample {
        temperature_c: temperature,
        humidity_pct: f32::from(humidity) / 10.0,
    })
}

/// Bit-banged DHT22 driver over an open-drain pin.
pub struct Dht22<P, D, T> {
    pin: P,
    delay: D,
    clock: T,
}

impl<P, D, T> Dht22<P, D, T>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    T: TimePort,
{
    pub fn new(pin: P, delay: D, clock: T) -> Self {
        Self { pin, delay, clock }
    }

    /// One full transaction: start signal, response, 40 bits, checksum.
    pub fn read(&mut self) -> Result<ClimateSample, SensorError> {
        self.pin.set_low().map_err(|_| SensorError::PinFault)?;
        self.delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| SensorError::PinFault)?;

        // Sensor pulls low, then high, then low again before the first bit.
        for level in [false, true, false] {
            self.wait_level(level).map_err(|e| match e {
                SensorError::BitTimeout => SensorError::NoResponse,
                other => other,
            })?;
        }

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            let rise = self.wait_level(true)?;
            let fall = self.wait_level(false)?;
            if fall.saturating_sub(rise) > ONE_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        decode_frame(frame)
    }

    fn wait_level(&mut self, high: bool) -> Result<u64, SensorError> {
        let start = self.clock.now_us();
        loop {
            let now = self.clock.now_us();
            if self.pin.is_high().map_err(|_| SensorError::PinFault)? == high {
                return Ok(now);
            }
            if now.saturating_sub(start) > LEVEL_TIMEOUT_US {
                return Err(SensorError::BitTimeout);
            }
        }
    }
}

impl<P, D, T> ClimateSensor for Dht22<P, D, T>
where
    P: InputPin + OutputPin,
    D: DelayNs,
    T: TimePort,
{
    fn read(&mut self) -> Result<ClimateSample, SensorError> {
        Dht22::read(self)
    }
}

/// Fault-absorbing wrapper: exactly one attempt per call, no retry.
pub struct ClimateReader<S> {
    sensor: S,
}

impl<S: ClimateSensor> ClimateReader<S> {
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// `(temperature_c, humidity_pct)`; both `None` when the read failed.
    pub fn measure(&mut self) -> (Option<f32>, Option<f32>) {
        match self.sensor.read() {
            Ok(s) => (Some(s.temperature_c), Some(s.humidity_pct)),
            Err(e) => {
                warn!("Climate sensor read failed: {}", e);
                (None, None)
            }
        }
    }
}
