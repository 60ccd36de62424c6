//! Integration tests for the BinService → actuators → status pipeline.
//!
//! These exercise one cycle at a time without the supervisor, checking
//! degraded readings and the alert boundaries end to end.

use smartbin::app::alert::AlertCause;
use smartbin::app::events::AppEvent;
use smartbin::app::fill::FillLevel;
use smartbin::app::model::{LidState, LightState};
use smartbin::app::service::BinService;
use smartbin::config::SystemConfig;

use crate::mock_hw::{MockHardware, RecordingSink, command};

fn make_app() -> (BinService, RecordingSink) {
    let mut app = BinService::new(&SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, sink)
}

fn last_alert(sink: &RecordingSink) -> Option<AlertCause> {
    sink.events.iter().rev().find_map(|e| match e {
        AppEvent::Alert(c) => Some(Some(*c)),
        AppEvent::AlertClear => Some(None),
        _ => None,
    })?
}

#[test]
fn starts_closed_and_off() {
    let (app, sink) = make_app();
    assert_eq!(app.lid_state(), LidState::Closed);
    assert_eq!(app.light_state(), LightState::Off);
    assert!(matches!(
        sink.events[0],
        AppEvent::Started {
            lid: LidState::Closed,
            light: LightState::Off
        }
    ));
}

#[test]
fn all_sensors_failing_degrades_gracefully() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(None, None, None);
    let status = app.run_cycle(&mut hw, &mut sink);

    assert_eq!(status.fill, FillLevel::Unavailable);
    assert_eq!(
        status.to_payload(),
        "Temp: error, Hum: error, Dist: error, Fill: unavailable, Lid: closed, LED: off"
    );
    assert!(hw.light_sets.is_empty());
    assert_eq!(last_alert(&sink), None);
}

#[test]
fn humidity_threshold_is_exclusive() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(Some(40.0), Some(20.0), Some(85.0));
    app.run_cycle(&mut hw, &mut sink);
    assert_eq!(app.light_state(), LightState::Off);

    hw.reading.humidity_pct = Some(85.1);
    app.run_cycle(&mut hw, &mut sink);
    assert_eq!(app.light_state(), LightState::On);
    assert_eq!(last_alert(&sink), Some(AlertCause::Liquid));
}

#[test]
fn fill_threshold_is_inclusive() {
    let (mut app, mut sink) = make_app();
    // 14 cm over a 5–50 cm span is exactly 80 %.
    let mut hw = MockHardware::new(Some(14.0), Some(20.0), Some(40.0));
    let status = app.run_cycle(&mut hw, &mut sink);
    assert_eq!(status.fill, FillLevel::Percent(80));
    assert_eq!(app.light_state(), LightState::On);
    assert_eq!(last_alert(&sink), Some(AlertCause::Full));

    hw.reading.distance_cm = Some(14.5);
    let status = app.run_cycle(&mut hw, &mut sink);
    assert_eq!(status.fill, FillLevel::Percent(78));
    assert_eq!(app.light_state(), LightState::Off);
}

#[test]
fn missing_distance_does_not_mask_liquid() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(None, Some(20.0), Some(95.0));
    app.run_cycle(&mut hw, &mut sink);
    assert_eq!(app.light_state(), LightState::On);
    assert_eq!(last_alert(&sink), Some(AlertCause::Liquid));
}

#[test]
fn missing_humidity_does_not_mask_full() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::new(Some(3.0), None, None);
    let status = app.run_cycle(&mut hw, &mut sink);
    assert_eq!(status.fill, FillLevel::Percent(100));
    assert_eq!(app.light_state(), LightState::On);
}

#[test]
fn remote_light_command_is_overridden_by_policy_next_cycle() {
    let (mut app, mut sink) = make_app();
    let mut hw = MockHardware::calm();
    app.handle_message(&command("lon"), &mut hw, &mut sink).unwrap();
    assert_eq!(app.light_state(), LightState::On);

    app.run_cycle(&mut hw, &mut sink);
    assert_eq!(app.light_state(), LightState::Off);
    assert_eq!(hw.light_sets, vec![LightState::On, LightState::Off]);
}

#[test]
fn custom_tokens_replace_defaults() {
    let mut cfg = SystemConfig::default();
    cfg.command_tokens.open_lid = "open".into();
    let mut app = BinService::new(&cfg);
    let mut sink = RecordingSink::new();
    let mut hw = MockHardware::calm();

    assert!(app.interpret("tabre", &mut hw, &mut sink).is_err());
    assert!(app.interpret("open", &mut hw, &mut sink).is_ok());
    assert_eq!(hw.lid_drives, vec![LidState::Open]);
}
