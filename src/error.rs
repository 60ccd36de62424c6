//! Unified error types for the SmartBin firmware.
//!
//! Three fault families reach the control loop:
//!
//! | Family   | Raised by                         | Recovery                          |
//! |----------|-----------------------------------|-----------------------------------|
//! | Sensor   | ranger timeout, DHT transaction   | value becomes unavailable         |
//! | Link     | Wi-Fi, MQTT connect/poll/publish  | one reconnect, then restart       |
//! | Protocol | unrecognised inbound payload      | ignored, logged                   |
//!
//! All variants are `Copy` so they can be carried inside events without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Faults carried by [`AppEvent::Fault`](crate::app::events::AppEvent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor transaction failed.
    Sensor(SensorError),
    /// The network or messaging transport failed.
    Link(LinkError),
    /// An inbound message could not be interpreted.
    Protocol(ProtocolError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Protocol(e) => write!(f, "protocol: {e}"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for SensorError {}
impl std::error::Error for LinkError {}
impl std::error::Error for ProtocolError {}
impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Which edge of the echo pulse the ranger was waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoEdge {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The echo line did not change within the configured timeout.
    EchoTimeout { edge: EchoEdge },
    /// The DHT22 did not pull the line low after the start signal.
    NoResponse,
    /// A DHT22 data bit did not complete in time.
    BitTimeout,
    /// The DHT22 frame checksum did not match.
    ChecksumMismatch,
    /// A GPIO read or write returned an error.
    PinFault,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EchoTimeout { edge: EchoEdge::Rising } => write!(f, "echo rising edge timeout"),
            Self::EchoTimeout { edge: EchoEdge::Falling } => write!(f, "echo falling edge timeout"),
            Self::NoResponse => write!(f, "no response to start signal"),
            Self::BitTimeout => write!(f, "data bit timeout"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::PinFault => write!(f, "GPIO access failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Network association did not come up.
    NetworkUnavailable,
    /// The broker session could not be created.
    ConnectFailed,
    /// Subscribing to the command topic failed.
    SubscribeFailed,
    /// A status publish was rejected by the transport.
    PublishFailed,
    /// The transport reported that the session dropped.
    Disconnected,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkUnavailable => write!(f, "network unavailable"),
            Self::ConnectFailed => write!(f, "broker connect failed"),
            Self::SubscribeFailed => write!(f, "subscribe failed"),
            Self::PublishFailed => write!(f, "publish failed"),
            Self::Disconnected => write!(f, "session disconnected"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Protocol errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload is not one of the configured command tokens.
    UnknownCommand,
    /// Payload is not valid UTF-8.
    InvalidUtf8,
    /// Payload exceeds the inbound buffer.
    Oversized,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::InvalidUtf8 => write!(f, "payload is not UTF-8"),
            Self::Oversized => write!(f, "payload too large"),
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON overlay could not be parsed.
    Malformed,
    /// A field failed range validation.  Names the field and the rule.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config document"),
            Self::Invalid(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}
