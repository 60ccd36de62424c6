//! Outbound application events.
//!
//! The [`BinService`](super::service::BinService) and the
//! [`Supervisor`](crate::supervisor::Supervisor) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (log to serial, record in a test).

use crate::error::Error;
use crate::inbound::InboundMessage;
use crate::supervisor::LinkState;

use super::alert::AlertCause;
use super::model::{LidState, LightState};
use super::status::StatusReport;

/// Where a fault surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOp {
    Associate,
    Connect,
    Reconnect,
    Poll,
    Publish,
    Interpret,
}

impl FaultOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Associate => "associate",
            Self::Connect => "connect",
            Self::Reconnect => "reconnect",
            Self::Poll => "poll",
            Self::Publish => "publish",
            Self::Interpret => "interpret",
        }
    }
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started with the boot-time actuator states.
    Started { lid: LidState, light: LightState },

    /// The lid was physically driven to a new position.
    LidChanged { from: LidState, to: LidState },

    /// The indicator light was physically switched.
    LightChanged { from: LightState, to: LightState },

    /// A remote message arrived and is about to be interpreted.
    CommandReceived(InboundMessage),

    /// The automatic policy holds the light on for this reason.
    Alert(AlertCause),

    /// The automatic policy found no reason to light the indicator.
    AlertClear,

    /// The per-cycle status line, just before it is published.
    Status(StatusReport),

    /// A sensor, link or protocol fault with the operation it hit.
    Fault { op: FaultOp, error: Error },

    /// The control loop moved between link states.
    LinkStateChanged { from: LinkState, to: LinkState },

    /// The loop gave up on the link and is about to restart the device.
    Restarting { pause_ms: u32 },
}
