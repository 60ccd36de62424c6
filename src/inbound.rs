//! Inbound command queue.
//!
//! The MQTT client delivers messages from its own task; the control loop
//! interprets them synchronously at the start of each cycle.  This bounded
//! `embassy-sync` channel is the only hand-off between the two.
//!
//! ```text
//! ┌──────────────┐  InboundMessage  ┌──────────────┐
//! │ MQTT callback│─────────────────▶│ Control loop │
//! │ (client task)│   try_send       │ try_receive  │
//! └──────────────┘                  └──────────────┘
//! ```
//!
//! Arrival order is preserved.  When the queue is full the newest message
//! is dropped and logged.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;
use log::warn;

use crate::error::ProtocolError;

/// Longest topic name accepted.
pub const MAX_TOPIC_LEN: usize = 64;

/// Longest command payload accepted.  Command tokens are short words.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Messages buffered between two cycles.
const QUEUE_DEPTH: usize = 16;

/// One received message, already validated as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String<MAX_TOPIC_LEN>,
    pub payload: String<MAX_PAYLOAD_LEN>,
}

impl InboundMessage {
    /// Validate raw transport bytes into a message.
    pub fn from_raw(topic: &str, payload: &[u8]) -> Result<Self, ProtocolError> {
        let text = core::str::from_utf8(payload).map_err(|_| ProtocolError::InvalidUtf8)?;
        let mut t = String::new();
        t.push_str(topic).map_err(|_| ProtocolError::Oversized)?;
        let mut p = String::new();
        p.push_str(text).map_err(|_| ProtocolError::Oversized)?;
        Ok(Self { topic: t, payload: p })
    }
}

/// Bounded FIFO shared between the transport callback and the loop.
pub struct InboundQueue {
    channel: Channel<CriticalSectionRawMutex, InboundMessage, QUEUE_DEPTH>,
}

impl Default for InboundQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InboundQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue a raw message.  Returns `false` if it was dropped.
    ///
    /// Safe to call from the transport task.
    pub fn push(&self, topic: &str, payload: &[u8]) -> bool {
        let msg = match InboundMessage::from_raw(topic, payload) {
            Ok(m) => m,
            Err(e) => {
                warn!(
                    "Inbound: dropping message on '{}' ({} bytes): {}",
                    topic,
                    payload.len(),
                    e
                );
                return false;
            }
        };
        if self.channel.try_send(msg).is_err() {
            warn!("Inbound: queue full, dropping message on '{}'", topic);
            return false;
        }
        true
    }

    /// Pop the oldest pending message, if any.
    pub fn pop(&self) -> Option<InboundMessage> {
        self.channel.try_receive().ok()
    }

    /// Discard everything queued (a new session starts clean).
    pub fn clear(&self) {
        self.channel.clear();
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_arrival_order() {
        let q = InboundQueue::new();
        assert!(q.push("lixeira/comandos", b"tabre"));
        assert!(q.push("lixeira/comandos", b"lon"));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().unwrap().payload.as_str(), "tabre");
        assert_eq!(q.pop().unwrap().payload.as_str(), "lon");
        assert!(q.pop().is_none());
    }

    #[test]
    fn rejects_invalid_utf8() {
        let q = InboundQueue::new();
        assert!(!q.push("t", &[0xff, 0xfe]));
        assert!(q.is_empty());
    }

    #[test]
    fn rejects_oversized_payload() {
        let q = InboundQueue::new();
        let big = [b'a'; MAX_PAYLOAD_LEN + 1];
        assert!(!q.push("t", &big));
        assert_eq!(
            InboundMessage::from_raw("t", &big),
            Err(ProtocolError::Oversized)
        );
    }

    #[test]
    fn drops_newest_when_full() {
        let q = InboundQueue::new();
        for _ in 0..QUEUE_DEPTH {
            assert!(q.push("t", b"lon"));
        }
        assert!(!q.push("t", b"loff"));
        assert_eq!(q.len(), QUEUE_DEPTH);
        q.clear();
        assert!(q.is_empty());
    }
}
