//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, stderr on the host).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::status::StatusReport;
use crate::error::Error;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `12.3 unit`, or `error`.
fn reading(v: Option<f32>, unit: &str) -> String {
    match v {
        Some(v) => format!("{:.1} {}", v, unit),
        None => "error".into(),
    }
}

fn log_status_block(s: &StatusReport) {
    info!("STATUS | ----------------------------");
    info!("STATUS | Distance:    {}", reading(s.distance_cm, "cm"));
    info!("STATUS | Fill level:  {}", s.fill);
    info!("STATUS | Temperature: {}", reading(s.temperature_c, "\u{00b0}C"));
    info!("STATUS | Humidity:    {}", reading(s.humidity_pct, "%"));
    info!("STATUS | Lid:         {}", s.lid);
    info!("STATUS | LED:         {}", s.light);
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { lid, light } => {
                info!("STATE | started, lid={} light={}", lid, light);
            }
            AppEvent::LidChanged { from, to } => {
                info!("STATE | lid {} -> {}", from, to);
            }
            AppEvent::LightChanged { from, to } => {
                info!("STATE | LED {} -> {}", from, to);
            }
            AppEvent::CommandReceived(msg) => {
                info!("CMD | [{}] {}", msg.topic, msg.payload);
            }
            AppEvent::Alert(cause) => {
                warn!("ALERT | {}", cause);
            }
            AppEvent::AlertClear => {
                debug!("ALERT | none");
            }
            AppEvent::Status(s) => log_status_block(s),
            AppEvent::Fault { op, error: Error::Link(e) } => {
                warn!("LINK | {} failed: {}", op.as_str(), e);
            }
            AppEvent::Fault { op, error } => {
                warn!("CMD | {} failed: {}", op.as_str(), error);
            }
            AppEvent::LinkStateChanged { from, to } => {
                info!("LINK | {:?} -> {:?}", from, to);
            }
            AppEvent::Restarting { pause_ms } => {
                warn!("LINK | restarting in {} ms", pause_ms);
            }
        }
    }
}
