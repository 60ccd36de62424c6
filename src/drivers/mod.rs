//! Actuator drivers and the task watchdog.

pub mod indicator_led;
pub mod lid_servo;
pub mod watchdog;
