//! Lid servo driver (SG90-class hobby servo on an LEDC channel).
//!
//! Two fixed positions expressed as duty fractions of a 50 Hz frame.
//! Open-loop: the servo's real position is never read back.
//!
//! This is a dumb actuator; idempotence and logging live in the
//! actuator controller.

use embedded_hal::pwm::SetDutyCycle;

use crate::app::model::LidState;

/// Duty for the open position, in 1/1023 of a frame.
pub const OPEN_DUTY: u16 = 90;
/// Duty for the closed position, in 1/1023 of a frame.
pub const CLOSED_DUTY: u16 = 40;
/// Denominator matching a 10-bit LEDC timer.
const DUTY_SCALE: u16 = 1023;

pub struct LidServo<P> {
    pwm: P,
}

impl<P: SetDutyCycle> LidServo<P> {
    /// The servo is not driven until the first [`drive`](Self::drive).
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    pub fn drive(&mut self, target: LidState) -> Result<(), P::Error> {
        let duty = match target {
            LidState::Open => OPEN_DUTY,
            LidState::Closed => CLOSED_DUTY,
        };
        self.pwm.set_duty_cycle_fraction(duty, DUTY_SCALE)
    }
}
