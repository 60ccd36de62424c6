//! SmartBin Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   WifiAdapter   MqttLink       │
//! │  (Sensor+Actuator) (EventSink)    (NetworkPort) (MessageLink)  │
//! │  EspPlatform       Esp32TimeAdapter                            │
//! │  (PlatformPort)    (TimePort)                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              BinService (pure logic)                   │    │
//! │  │  Commands · Fill · Alert · Actuators · Status          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Supervisor (INIT → LINK_UP → CYCLING ⇄ LINK_DOWN → restart)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::info;

use smartbin::adapters::hardware::HardwareAdapter;
use smartbin::adapters::log_sink::LogEventSink;
use smartbin::adapters::mqtt::MqttLink;
use smartbin::adapters::platform::EspPlatform;
use smartbin::adapters::time::Esp32TimeAdapter;
use smartbin::adapters::wifi::WifiAdapter;
use smartbin::config::SystemConfig;
use smartbin::drivers::indicator_led::IndicatorLed;
use smartbin::drivers::lid_servo::LidServo;
use smartbin::drivers::watchdog::Watchdog;
use smartbin::pins;
use smartbin::sensors::SensorHub;
use smartbin::sensors::climate::Dht22;
use smartbin::sensors::ultrasonic::UltrasonicRanger;
use smartbin::supervisor::Supervisor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartBin v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::from_build_env();
    info!(
        "Config: broker={} client='{}' cmd='{}' status='{}' cycle={}ms",
        config.broker_url(),
        config.client_id,
        config.command_topic,
        config.status_topic,
        config.cycle_interval_ms
    );
    info!(
        "Pins: trig={} echo={} dht={} servo={} ({} Hz, {}-bit) led={}",
        pins::ULTRASONIC_TRIG_GPIO,
        pins::ULTRASONIC_ECHO_GPIO,
        pins::DHT_DATA_GPIO,
        pins::LID_SERVO_GPIO,
        pins::SERVO_PWM_FREQ_HZ,
        pins::SERVO_PWM_RESOLUTION_BITS,
        pins::INDICATOR_LED_GPIO
    );

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 3. Sensors ────────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let ranger = UltrasonicRanger::new(
        PinDriver::output(peripherals.pins.gpio18)?,
        PinDriver::input(peripherals.pins.gpio19)?,
        Ets,
        clock,
        config.echo_timeout_us,
    );
    let mut dht_pin = PinDriver::input_output_od(peripherals.pins.gpio22)?;
    dht_pin.set_high()?;
    let dht = Dht22::new(dht_pin, Ets, clock);

    // ── 4. Actuators ──────────────────────────────────────────
    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(pins::SERVO_PWM_FREQ_HZ))
            .resolution(Resolution::Bits10),
    )?;
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel0, servo_timer, peripherals.pins.gpio13)?;
    let led_pin = PinDriver::output(peripherals.pins.gpio23)?;

    let hardware = HardwareAdapter::new(
        SensorHub::new(ranger, dht),
        LidServo::new(servo_pwm),
        IndicatorLed::new(led_pin),
    );

    // ── 5. Link ───────────────────────────────────────────────
    let wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;
    let network = WifiAdapter::new(wifi, &config)?;
    let link = MqttLink::new(&config);

    let platform = EspPlatform::new(Watchdog::new(config.watchdog_timeout_ms));

    // ── 6. Run ────────────────────────────────────────────────
    let mut supervisor = Supervisor::new(&config, network, link, hardware, platform, LogEventSink::new());
    supervisor.run();

    // Only reached if esp_restart() returned, which it does not.
    Ok(())
}
