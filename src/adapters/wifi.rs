//! WiFi station-mode adapter.
//!
//! Implements [`NetworkPort`] over the ESP-IDF WiFi driver.  Association
//! is polled a bounded number of times; when the budget runs out the
//! supervisor restarts the device rather than looping with stale state.

use std::thread;
use std::time::Duration;

use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{error, info};

use crate::app::ports::NetworkPort;
use crate::config::SystemConfig;
use crate::error::LinkError;

pub struct WifiAdapter {
    wifi: BlockingWifi<EspWifi<'static>>,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    attempts: u32,
    poll_interval: Duration,
}

impl WifiAdapter {
    /// Credentials are validated by [`SystemConfig::validate`] beforehand.
    pub fn new(wifi: BlockingWifi<EspWifi<'static>>, config: &SystemConfig) -> Result<Self, LinkError> {
        let mut ssid = heapless::String::new();
        ssid.push_str(&config.wifi_ssid)
            .map_err(|_| LinkError::NetworkUnavailable)?;
        let mut password = heapless::String::new();
        password
            .push_str(&config.wifi_password)
            .map_err(|_| LinkError::NetworkUnavailable)?;
        Ok(Self {
            wifi,
            ssid,
            password,
            attempts: config.wifi_connect_attempts,
            poll_interval: Duration::from_millis(u64::from(config.wifi_poll_interval_ms)),
        })
    }

    fn configure(&mut self) -> Result<(), LinkError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let conf = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| LinkError::NetworkUnavailable)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| LinkError::NetworkUnavailable)?,
            auth_method,
            ..Default::default()
        });
        self.wifi.set_configuration(&conf).map_err(|e| {
            error!("WiFi: set_configuration failed: {}", e);
            LinkError::NetworkUnavailable
        })?;
        if !self.wifi.is_started().unwrap_or(false) {
            self.wifi.start().map_err(|e| {
                error!("WiFi: start failed: {}", e);
                LinkError::NetworkUnavailable
            })?;
        }
        Ok(())
    }
}

impl NetworkPort for WifiAdapter {
    fn associate(&mut self) -> Result<(), LinkError> {
        self.configure()?;

        info!("WiFi: connecting to '{}'", self.ssid);
        // Non-blocking request; completion is polled below.
        self.wifi.wifi_mut().connect().map_err(|e| {
            error!("WiFi: connect request failed: {}", e);
            LinkError::NetworkUnavailable
        })?;

        for attempt in 1..=self.attempts {
            if self.wifi.is_connected().unwrap_or(false) {
                self.wifi.wait_netif_up().map_err(|e| {
                    error!("WiFi: netif did not come up: {}", e);
                    LinkError::NetworkUnavailable
                })?;
                info!("WiFi: connected after {} polls", attempt);
                return Ok(());
            }
            thread::sleep(self.poll_interval);
        }

        error!("WiFi: not associated after {} polls", self.attempts);
        Err(LinkError::NetworkUnavailable)
    }
}
