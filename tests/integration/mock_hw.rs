//! Mock adapters for integration tests.
//!
//! Records every actuator, transport and platform call so tests can assert
//! on the full history without touching real GPIO or sockets.

use std::collections::VecDeque;

use smartbin::app::events::AppEvent;
use smartbin::app::model::{LidState, LightState, SensorReading};
use smartbin::app::ports::{
    ActuatorPort, EventSink, MessageLink, NetworkPort, PlatformPort, SensorPort,
};
use smartbin::error::LinkError;
use smartbin::inbound::InboundMessage;

pub const COMMAND_TOPIC: &str = "lixeira/comandos";

pub fn command(payload: &str) -> InboundMessage {
    InboundMessage::from_raw(COMMAND_TOPIC, payload.as_bytes()).unwrap()
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub reading: SensorReading,
    pub reads: usize,
    pub lid_drives: Vec<LidState>,
    pub light_sets: Vec<LightState>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(distance_cm: Option<f32>, temperature_c: Option<f32>, humidity_pct: Option<f32>) -> Self {
        Self {
            reading: SensorReading {
                distance_cm,
                temperature_c,
                humidity_pct,
            },
            reads: 0,
            lid_drives: Vec::new(),
            light_sets: Vec::new(),
        }
    }

    /// Half-full bin in dry air: no alert.
    pub fn calm() -> Self {
        Self::new(Some(30.0), Some(22.0), Some(40.0))
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorReading {
        self.reads += 1;
        self.reading
    }
}

impl ActuatorPort for MockHardware {
    fn drive_lid(&mut self, target: LidState) {
        self.lid_drives.push(target);
    }

    fn set_light(&mut self, target: LightState) {
        self.light_sets.push(target);
    }
}

// ── MockNetwork ───────────────────────────────────────────────

pub struct MockNetwork {
    pub result: Result<(), LinkError>,
    pub calls: usize,
}

#[allow(dead_code)]
impl MockNetwork {
    pub fn up() -> Self {
        Self {
            result: Ok(()),
            calls: 0,
        }
    }

    pub fn down() -> Self {
        Self {
            result: Err(LinkError::NetworkUnavailable),
            calls: 0,
        }
    }
}

impl NetworkPort for MockNetwork {
    fn associate(&mut self) -> Result<(), LinkError> {
        self.calls += 1;
        self.result
    }
}

// ── MockLink ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLink {
    pub inbox: VecDeque<InboundMessage>,
    pub published: Vec<(String, String)>,
    pub connects: usize,
    /// Results for successive `connect` calls; `Ok` once exhausted.
    pub connect_results: VecDeque<Result<(), LinkError>>,
    /// One-shot failure for the next `poll_message`.
    pub poll_error: Option<LinkError>,
    /// One-shot failure for the next `publish`.
    pub publish_error: Option<LinkError>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliver(&mut self, payload: &str) {
        self.inbox.push_back(command(payload));
    }

    pub fn last_payload(&self) -> Option<&str> {
        self.published.last().map(|(_, p)| p.as_str())
    }
}

impl MessageLink for MockLink {
    fn connect(&mut self) -> Result<(), LinkError> {
        self.connects += 1;
        self.connect_results.pop_front().unwrap_or(Ok(()))
    }

    fn poll_message(&mut self) -> Result<Option<InboundMessage>, LinkError> {
        if let Some(e) = self.poll_error.take() {
            return Err(e);
        }
        Ok(self.inbox.pop_front())
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError> {
        if let Some(e) = self.publish_error.take() {
            return Err(e);
        }
        self.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }
}

// ── MockPlatform ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockPlatform {
    pub sleeps: Vec<u32>,
    pub feeds: usize,
    pub restarts: usize,
}

impl PlatformPort for MockPlatform {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
    }

    fn feed_watchdog(&mut self) {
        self.feeds += 1;
    }

    fn restart(&mut self) {
        self.restarts += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
