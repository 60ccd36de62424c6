//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BinService / Supervisor (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks, transport, platform)
//! implement these traits.  The domain consumes them via generics, so the
//! core never touches hardware or sockets directly and every path can be
//! exercised with mocks on the host.

use crate::error::LinkError;
use crate::inbound::InboundMessage;

use super::events::AppEvent;
use super::model::{LidState, LightState, SensorReading};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Sample every sensor exactly once.  Failed measurements come back as
    /// `None`; implementations log the underlying fault.
    fn read_all(&mut self) -> SensorReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: raw, open-loop actuation.  No position feedback.
pub trait ActuatorPort {
    /// Drive the lid servo to the open or closed position.
    fn drive_lid(&mut self, target: LidState);

    /// Switch the indicator light.
    fn set_light(&mut self, target: LightState);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: monotonic clock → sensor drivers)
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond clock used for pulse-width and bit timing.
pub trait TimePort {
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Network association port
// ───────────────────────────────────────────────────────────────

/// Link-layer association (Wi-Fi station or equivalent).
pub trait NetworkPort {
    /// Bring the association up, blocking until it succeeds or the
    /// configured attempts are exhausted.
    fn associate(&mut self) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Messaging session port
// ───────────────────────────────────────────────────────────────

/// Publish/subscribe session with the remote controller.
///
/// Implementations own the session handle.  [`connect`](Self::connect)
/// always discards any previous session and builds a fresh one; there is
/// no partial repair.
pub trait MessageLink {
    /// Create a new session and subscribe to the command topic.
    fn connect(&mut self) -> Result<(), LinkError>;

    /// Take the next inbound message received since the last call.
    /// `Ok(None)` means nothing is pending.
    fn poll_message(&mut self) -> Result<Option<InboundMessage>, LinkError>;

    /// Publish a UTF-8 payload.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Platform port (sleep, watchdog, restart)
// ───────────────────────────────────────────────────────────────

/// Process-level services the control loop relies on.
pub trait PlatformPort {
    /// Block the loop for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Reset the task watchdog.  Must be called at least once per cycle.
    fn feed_watchdog(&mut self);

    /// Restart the whole device.  On hardware this does not return; all
    /// in-memory state is lost.
    fn restart(&mut self);
}
