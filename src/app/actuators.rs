//! Actuator controller: sole owner of the lid and light states.
//!
//! Every operation is idempotent: when the current state already matches
//! the target nothing is actuated and nothing is emitted.  Otherwise the
//! hardware is driven, the state updated, and one `*Changed` event emitted.
//! Remote commands and the automatic alert policy both go through here.
//!
//! Actuation is open-loop; the physical lid position is never read back.

use super::events::AppEvent;
use super::model::{LidState, LightState};
use super::ports::{ActuatorPort, EventSink};

/// In-memory actuator state.  Reset to `Closed`/`Off` on every boot.
#[derive(Debug, Default)]
pub struct ActuatorController {
    lid: LidState,
    light: LightState,
}

impl ActuatorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lid(&self) -> LidState {
        self.lid
    }

    pub fn light(&self) -> LightState {
        self.light
    }

    /// Returns `true` if the lid was actuated.
    pub fn open_lid(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> bool {
        self.set_lid(LidState::Open, hw, sink)
    }

    pub fn close_lid(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> bool {
        self.set_lid(LidState::Closed, hw, sink)
    }

    /// Returns `true` if the light was switched.
    pub fn light_on(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> bool {
        self.set_light(LightState::On, hw, sink)
    }

    pub fn light_off(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> bool {
        self.set_light(LightState::Off, hw, sink)
    }

    fn set_lid(
        &mut self,
        target: LidState,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.lid == target {
            return false;
        }
        hw.drive_lid(target);
        let from = core::mem::replace(&mut self.lid, target);
        sink.emit(&AppEvent::LidChanged { from, to: target });
        true
    }

    fn set_light(
        &mut self,
        target: LightState,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> bool {
        if self.light == target {
            return false;
        }
        hw.set_light(target);
        let from = core::mem::replace(&mut self.light, target);
        sink.emit(&AppEvent::LightChanged { from, to: target });
        true
    }
}
