//! Control-loop scenarios: the supervisor driving the service against
//! mock hardware, a mock broker link and a mock platform.

use smartbin::app::alert::AlertCause;
use smartbin::app::events::{AppEvent, FaultOp};
use smartbin::app::model::{LidState, LightState};
use smartbin::config::SystemConfig;
use smartbin::error::{Error, LinkError, ProtocolError};
use smartbin::supervisor::{LinkState, Supervisor};

use crate::mock_hw::{MockHardware, MockLink, MockNetwork, MockPlatform, RecordingSink};

type Sup = Supervisor<MockNetwork, MockLink, MockHardware, MockPlatform, RecordingSink>;

fn make(hw: MockHardware, link: MockLink) -> Sup {
    Supervisor::new(
        &SystemConfig::default(),
        MockNetwork::up(),
        link,
        hw,
        MockPlatform::default(),
        RecordingSink::new(),
    )
}

/// Run INIT and LINK_UP so the next step is a full cycle.
fn bring_up(sup: &mut Sup) {
    assert_eq!(sup.step(), LinkState::LinkUp);
    assert_eq!(sup.step(), LinkState::Cycling);
}

// ── Steady state ──────────────────────────────────────────────

#[test]
fn full_humid_bin_lights_indicator_and_publishes_status() {
    let mut sup = make(
        MockHardware::new(Some(5.0), Some(25.0), Some(90.0)),
        MockLink::new(),
    );
    bring_up(&mut sup);
    assert_eq!(sup.step(), LinkState::Cycling);

    assert_eq!(
        sup.link().last_payload(),
        Some("Temp: 25.0C, Hum: 90.0%, Dist: 5.0cm, Fill: 100%, Lid: closed, LED: on")
    );
    assert_eq!(sup.link().published[0].0, "lixeira/status");
    assert_eq!(sup.hardware().light_sets, vec![LightState::On]);
    assert_eq!(
        sup.sink()
            .count(|e| matches!(e, AppEvent::Alert(AlertCause::FullAndLiquid))),
        1
    );
}

#[test]
fn each_cycle_sleeps_the_configured_interval() {
    let mut sup = make(MockHardware::calm(), MockLink::new());
    bring_up(&mut sup);
    for _ in 0..3 {
        sup.step();
    }
    assert_eq!(sup.platform().sleeps, vec![5000, 5000, 5000]);
    assert_eq!(sup.link().published.len(), 3);
    assert_eq!(sup.hardware().reads, 3);
    assert_eq!(sup.service().cycle_count(), 3);
}

#[test]
fn watchdog_is_fed_every_step() {
    let mut sup = make(MockHardware::calm(), MockLink::new());
    bring_up(&mut sup);
    sup.step();
    sup.step();
    assert_eq!(sup.platform().feeds, 4);
}

// ── Command routing ───────────────────────────────────────────

#[test]
fn open_command_actuates_lid_once() {
    let mut link = MockLink::new();
    link.deliver("tabre");
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);
    sup.step();

    assert_eq!(sup.hardware().lid_drives, vec![LidState::Open]);
    assert_eq!(sup.service().lid_state(), LidState::Open);
    assert!(sup.link().last_payload().unwrap().contains("Lid: open"));

    sup.link_mut().deliver("tabre");
    sup.step();
    assert_eq!(sup.hardware().lid_drives, vec![LidState::Open]);

    sup.link_mut().deliver("tfecha");
    sup.step();
    assert_eq!(
        sup.hardware().lid_drives,
        vec![LidState::Open, LidState::Closed]
    );
}

#[test]
fn unknown_command_changes_nothing() {
    let mut link = MockLink::new();
    link.deliver("explode");
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);
    sup.step();

    assert!(sup.hardware().lid_drives.is_empty());
    assert!(sup.hardware().light_sets.is_empty());
    assert_eq!(sup.state(), LinkState::Cycling);
    assert_eq!(
        sup.sink().count(|e| matches!(
            e,
            AppEvent::Fault {
                op: FaultOp::Interpret,
                error: Error::Protocol(ProtocolError::UnknownCommand)
            }
        )),
        1
    );
    assert_eq!(sup.sink().count(|e| matches!(e, AppEvent::CommandReceived(_))), 1);
}

#[test]
fn commands_are_drained_before_sensing() {
    // The remote switches the light on, then the policy on the same cycle
    // finds nothing wrong and switches it back off.
    let mut link = MockLink::new();
    link.deliver("lon");
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);
    sup.step();

    assert_eq!(
        sup.hardware().light_sets,
        vec![LightState::On, LightState::Off]
    );
    assert!(sup.link().last_payload().unwrap().ends_with("LED: off"));
}

#[test]
fn commands_apply_in_arrival_order() {
    let mut link = MockLink::new();
    for cmd in ["tabre", "tfecha", "tabre"] {
        link.deliver(cmd);
    }
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);
    sup.step();

    assert_eq!(
        sup.hardware().lid_drives,
        vec![LidState::Open, LidState::Closed, LidState::Open]
    );
}

#[test]
fn drain_is_bounded_per_cycle() {
    let mut link = MockLink::new();
    for _ in 0..10 {
        link.deliver("lon");
    }
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);
    sup.step();

    assert_eq!(sup.link().inbox.len(), 2);
    assert_eq!(sup.link().published.len(), 1);
}

// ── Link faults ───────────────────────────────────────────────

#[test]
fn publish_failure_then_failed_reconnect_restarts_once() {
    let mut link = MockLink::new();
    link.publish_error = Some(LinkError::PublishFailed);
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);

    assert_eq!(sup.step(), LinkState::LinkDown);
    sup.link_mut()
        .connect_results
        .push_back(Err(LinkError::ConnectFailed));
    assert_eq!(sup.step(), LinkState::Halted);

    assert_eq!(sup.platform().restarts, 1);
    assert_eq!(sup.link().connects, 2);
    assert_eq!(sup.platform().sleeps.last(), Some(&5000));

    // Nothing cycles once halted.
    let reads = sup.hardware().reads;
    sup.step();
    sup.run();
    assert_eq!(sup.hardware().reads, reads);
    assert_eq!(sup.platform().restarts, 1);
    assert!(sup.link().published.is_empty());
    assert_eq!(
        sup.sink()
            .count(|e| matches!(e, AppEvent::Restarting { pause_ms: 5000 })),
        1
    );
}

#[test]
fn successful_reconnect_resumes_cycling() {
    let mut link = MockLink::new();
    link.publish_error = Some(LinkError::Disconnected);
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);

    assert_eq!(sup.step(), LinkState::LinkDown);
    assert_eq!(sup.step(), LinkState::Cycling);
    assert_eq!(sup.step(), LinkState::Cycling);

    assert_eq!(sup.link().connects, 2);
    assert_eq!(sup.link().published.len(), 1);
    assert_eq!(sup.platform().restarts, 0);
    assert_eq!(
        sup.sink().count(|e| matches!(
            e,
            AppEvent::Fault {
                op: FaultOp::Publish,
                ..
            }
        )),
        1
    );
}

#[test]
fn poll_failure_goes_link_down_without_publishing() {
    let mut link = MockLink::new();
    link.poll_error = Some(LinkError::Disconnected);
    let mut sup = make(MockHardware::calm(), link);
    bring_up(&mut sup);

    assert_eq!(sup.step(), LinkState::LinkDown);
    assert!(sup.link().published.is_empty());
    assert_eq!(sup.hardware().reads, 0);
}

#[test]
fn association_failure_restarts_after_short_pause() {
    let mut sup = Supervisor::new(
        &SystemConfig::default(),
        MockNetwork::down(),
        MockLink::new(),
        MockHardware::calm(),
        MockPlatform::default(),
        RecordingSink::new(),
    );
    sup.run();

    assert_eq!(sup.state(), LinkState::Halted);
    assert_eq!(sup.platform().sleeps, vec![2000]);
    assert_eq!(sup.platform().restarts, 1);
    assert_eq!(sup.link().connects, 0);
}

#[test]
fn broker_failure_at_startup_restarts() {
    let mut link = MockLink::new();
    link.connect_results.push_back(Err(LinkError::ConnectFailed));
    let mut sup = make(MockHardware::calm(), link);
    sup.run();

    assert_eq!(sup.platform().sleeps, vec![5000]);
    assert_eq!(sup.platform().restarts, 1);
    assert_eq!(sup.hardware().reads, 0);
}

#[test]
fn state_changes_are_reported() {
    let mut sup = make(MockHardware::calm(), MockLink::new());
    bring_up(&mut sup);
    sup.step();

    let transitions: Vec<_> = sup
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::LinkStateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (LinkState::Init, LinkState::LinkUp),
            (LinkState::LinkUp, LinkState::Cycling),
        ]
    );
}
