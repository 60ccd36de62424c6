//! Application service: the hexagonal core.
//!
//! [`BinService`] owns the actuator controller and the derived-state
//! logic.  It interprets remote commands and runs the sensing half of each
//! cycle; all I/O flows through port traits injected at call sites.
//!
//! ```text
//!  SensorPort ──▶ ┌───────────────────────────────┐ ──▶ EventSink
//!                 │          BinService           │
//! ActuatorPort ◀──│ Commands · Fill · Alert · Status│
//!                 └───────────────────────────────┘
//! ```

use log::info;

use crate::config::{Calibration, CommandTokens, SystemConfig};
use crate::error::ProtocolError;
use crate::inbound::InboundMessage;

use super::actuators::ActuatorController;
use super::alert::AlertPolicy;
use super::commands::BinCommand;
use super::events::{AppEvent, FaultOp};
use super::fill;
use super::model::{LidState, LightState};
use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::status::StatusReport;

// ───────────────────────────────────────────────────────────────
// BinService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct BinService {
    tokens: CommandTokens,
    calibration: Calibration,
    policy: AlertPolicy,
    actuators: ActuatorController,
    cycle_count: u64,
}

impl BinService {
    /// Construct the service from configuration.  Actuators start
    /// `Closed`/`Off`; the physical state is not re-synced.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            tokens: config.command_tokens.clone(),
            calibration: config.calibration,
            policy: AlertPolicy::from_config(config),
            actuators: ActuatorController::new(),
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            lid: self.actuators.lid(),
            light: self.actuators.light(),
        });
        info!("BinService started");
    }

    // ── Command interpretation ────────────────────────────────

    /// Log and interpret one received message.
    pub fn handle_message(
        &mut self,
        msg: &InboundMessage,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<BinCommand, ProtocolError> {
        sink.emit(&AppEvent::CommandReceived(msg.clone()));
        self.interpret(&msg.payload, hw, sink)
    }

    /// Dispatch a raw payload.  Unknown payloads change nothing.
    pub fn interpret(
        &mut self,
        raw: &str,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<BinCommand, ProtocolError> {
        let Some(cmd) = BinCommand::parse(raw, &self.tokens) else {
            sink.emit(&AppEvent::Fault {
                op: FaultOp::Interpret,
                error: ProtocolError::UnknownCommand.into(),
            });
            return Err(ProtocolError::UnknownCommand);
        };
        self.execute(cmd, hw, sink);
        Ok(cmd)
    }

    /// Apply a parsed command to the actuators.
    pub fn execute(
        &mut self,
        cmd: BinCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            BinCommand::OpenLid => self.actuators.open_lid(hw, sink),
            BinCommand::CloseLid => self.actuators.close_lid(hw, sink),
            BinCommand::LightOn => self.actuators.light_on(hw, sink),
            BinCommand::LightOff => self.actuators.light_off(hw, sink),
        };
    }

    // ── Per-cycle sensing ─────────────────────────────────────

    /// Sample sensors, derive the fill level, apply the alert policy and
    /// return the status to publish.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> StatusReport {
        self.cycle_count += 1;

        let reading = hw.read_all();
        let fill = fill::estimate(reading.distance_cm, &self.calibration);

        match self.policy.evaluate(fill, reading.humidity_pct) {
            Some(cause) => {
                self.actuators.light_on(hw, sink);
                sink.emit(&AppEvent::Alert(cause));
            }
            None => {
                self.actuators.light_off(hw, sink);
                sink.emit(&AppEvent::AlertClear);
            }
        }

        let status = StatusReport::new(
            &reading,
            fill,
            self.actuators.lid(),
            self.actuators.light(),
        );
        sink.emit(&AppEvent::Status(status));
        status
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn lid_state(&self) -> LidState {
        self.actuators.lid()
    }

    pub fn light_state(&self) -> LightState {
        self.actuators.light()
    }

    /// Sensing cycles completed since boot.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}
