//! GPIO / peripheral pin assignments for the SmartBin board.
//!
//! Informational: `esp-idf-hal` peripherals are typed per pin, so `main`
//! picks them by name and only logs these numbers at boot.  Keep the two
//! in sync when rewiring.

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs HIGH pulse starts a measurement.
pub const ULTRASONIC_TRIG_GPIO: i32 = 18;
/// Digital input: HIGH for the round-trip time of the echo.
pub const ULTRASONIC_ECHO_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Climate sensor (DHT22 / AM2302)
// ---------------------------------------------------------------------------

/// Open-drain single-wire data line.
pub const DHT_DATA_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the lid servo.
pub const LID_SERVO_GPIO: i32 = 13;
/// Digital output: indicator light, active HIGH.
pub const INDICATOR_LED_GPIO: i32 = 23;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits).  10-bit gives 0 – 1023 duty levels.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 10;
