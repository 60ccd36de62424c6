//! ESP-IDF implementation of [`PlatformPort`].

use esp_idf_hal::delay::FreeRtos;
use log::warn;

use crate::app::ports::PlatformPort;
use crate::drivers::watchdog::Watchdog;

pub struct EspPlatform {
    watchdog: Watchdog,
}

impl EspPlatform {
    pub fn new(watchdog: Watchdog) -> Self {
        Self { watchdog }
    }
}

impl PlatformPort for EspPlatform {
    fn sleep_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }

    fn feed_watchdog(&mut self) {
        self.watchdog.feed();
    }

    fn restart(&mut self) {
        warn!("Platform: restarting");
        unsafe {
            esp_idf_svc::sys::esp_restart();
        }
    }
}
