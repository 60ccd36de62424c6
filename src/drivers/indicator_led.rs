//! Single-colour indicator light on a GPIO, active HIGH.

use embedded_hal::digital::OutputPin;

use crate::app::model::LightState;

pub struct IndicatorLed<P> {
    pin: P,
}

impl<P: OutputPin> IndicatorLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, state: LightState) -> Result<(), P::Error> {
        match state {
            LightState::On => self.pin.set_high(),
            LightState::Off => self.pin.set_low(),
        }
    }
}
