//! Main control loop and link supervisor.
//!
//! ```text
//!  INIT ──[associated]──▶ LINK_UP ──[session up]──▶ CYCLING ◀─┐
//!   │                        │                        │       │
//!   │                        │                  [link fault]  │
//!   │                        │                        ▼       │
//!   │                        │                    LINK_DOWN ──┘ [reconnected]
//!   │                        │                        │
//!   └──[fail]──▶ pause ◀─────┴──[fail]────────────────┘[fail]
//!                  │
//!                  ▼
//!               restart ──▶ HALTED
//! ```
//!
//! One [`step`](Supervisor::step) performs one state's worth of work.  In
//! `CYCLING` that is a full polling cycle: drain inbound commands, sample,
//! derive, apply the alert policy, publish, sleep.  Any transport fault
//! during drain or publish moves to `LINK_DOWN`, which tries exactly one
//! fresh session before giving up and restarting the device.
//!
//! Single-threaded: the supervisor owns every port and the service, so no
//! actuator state is ever touched concurrently.

use log::info;

use crate::app::events::{AppEvent, FaultOp};
use crate::app::ports::{ActuatorPort, EventSink, MessageLink, NetworkPort, PlatformPort, SensorPort};
use crate::app::service::BinService;
use crate::config::SystemConfig;
use crate::error::LinkError;

/// Link-health state of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Bringing up network association.
    Init,
    /// Associated; opening the messaging session.
    LinkUp,
    /// Steady state: one polling cycle per step.
    Cycling,
    /// A transport fault occurred; one reconnect attempt pending.
    LinkDown,
    /// Restart has been requested; nothing further runs.
    Halted,
}

/// Timing and topic parameters lifted from [`SystemConfig`].
#[derive(Debug, Clone)]
struct LoopParams {
    status_topic: String,
    cycle_interval_ms: u32,
    restart_pause_ms: u32,
    wifi_restart_pause_ms: u32,
    max_commands_per_cycle: u8,
}

/// Owns the service and every port; drives the state machine above.
pub struct Supervisor<N, L, H, P, S> {
    state: LinkState,
    params: LoopParams,
    service: BinService,
    network: N,
    link: L,
    hw: H,
    platform: P,
    sink: S,
}

impl<N, L, H, P, S> Supervisor<N, L, H, P, S>
where
    N: NetworkPort,
    L: MessageLink,
    H: SensorPort + ActuatorPort,
    P: PlatformPort,
    S: EventSink,
{
    pub fn new(config: &SystemConfig, network: N, link: L, hw: H, platform: P, mut sink: S) -> Self {
        let mut service = BinService::new(config);
        service.start(&mut sink);
        Self {
            state: LinkState::Init,
            params: LoopParams {
                status_topic: config.status_topic.clone(),
                cycle_interval_ms: config.cycle_interval_ms,
                restart_pause_ms: config.restart_pause_ms,
                wifi_restart_pause_ms: config.wifi_restart_pause_ms,
                max_commands_per_cycle: config.max_commands_per_cycle,
            },
            service,
            network,
            link,
            hw,
            platform,
            sink,
        }
    }

    /// Run until a restart is requested.  On hardware the restart never
    /// returns, so this only comes back in simulation.
    pub fn run(&mut self) {
        while self.step() != LinkState::Halted {}
    }

    /// Execute one state's worth of work and return the new state.
    pub fn step(&mut self) -> LinkState {
        if self.state != LinkState::Halted {
            self.platform.feed_watchdog();
        }
        let next = match self.state {
            LinkState::Init => match self.network.associate() {
                Ok(()) => LinkState::LinkUp,
                Err(e) => {
                    self.fault(FaultOp::Associate, e);
                    self.restart(self.params.wifi_restart_pause_ms)
                }
            },
            LinkState::LinkUp => match self.link.connect() {
                Ok(()) => LinkState::Cycling,
                Err(e) => {
                    self.fault(FaultOp::Connect, e);
                    self.restart(self.params.restart_pause_ms)
                }
            },
            LinkState::Cycling => match self.run_cycle() {
                Ok(()) => {
                    self.platform.sleep_ms(self.params.cycle_interval_ms);
                    LinkState::Cycling
                }
                Err((op, e)) => {
                    self.fault(op, e);
                    LinkState::LinkDown
                }
            },
            LinkState::LinkDown => match self.link.connect() {
                Ok(()) => {
                    info!("Link: reconnected");
                    self.platform.sleep_ms(self.params.cycle_interval_ms);
                    LinkState::Cycling
                }
                Err(e) => {
                    self.fault(FaultOp::Reconnect, e);
                    self.restart(self.params.restart_pause_ms)
                }
            },
            LinkState::Halted => LinkState::Halted,
        };
        self.transition(next);
        next
    }

    // ── Cycle ─────────────────────────────────────────────────

    fn run_cycle(&mut self) -> Result<(), (FaultOp, LinkError)> {
        self.drain_inbound().map_err(|e| (FaultOp::Poll, e))?;

        let status = self.service.run_cycle(&mut self.hw, &mut self.sink);
        let payload = status.to_payload();
        self.link
            .publish(&self.params.status_topic, &payload)
            .map_err(|e| (FaultOp::Publish, e))
    }

    /// Interpret the messages available this tick, oldest first, bounded
    /// so a flooding peer cannot starve sensing.
    fn drain_inbound(&mut self) -> Result<(), LinkError> {
        for _ in 0..self.params.max_commands_per_cycle {
            let Some(msg) = self.link.poll_message()? else {
                break;
            };
            // Unknown payloads are logged by the service; nothing to do here.
            let _ = self.service.handle_message(&msg, &mut self.hw, &mut self.sink);
        }
        Ok(())
    }

    // ── Faults / restart ──────────────────────────────────────

    fn fault(&mut self, op: FaultOp, error: LinkError) {
        self.sink.emit(&AppEvent::Fault {
            op,
            error: error.into(),
        });
    }

    fn restart(&mut self, pause_ms: u32) -> LinkState {
        self.sink.emit(&AppEvent::Restarting { pause_ms });
        self.platform.sleep_ms(pause_ms);
        self.platform.restart();
        LinkState::Halted
    }

    fn transition(&mut self, next: LinkState) {
        if next != self.state {
            self.sink.emit(&AppEvent::LinkStateChanged {
                from: self.state,
                to: next,
            });
            self.state = next;
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn service(&self) -> &BinService {
        &self.service
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
