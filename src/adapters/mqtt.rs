//! MQTT messaging session over the ESP-IDF MQTT client.
//!
//! ```text
//!  broker ──▶ EspMqttClient task ──callback──▶ InboundQueue ──▶ poll_message()
//!                    │                                             (loop)
//!                    └──── Connected / Disconnected ──▶ SessionFlags
//! ```
//!
//! The client runs its own task; the callback only validates and enqueues.
//! [`MqttLink::connect`] always tears down the previous client and builds
//! a fresh one, so a reconnect never inherits half-broken session state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use esp_idf_svc::mqtt::client::{Details, EspMqttClient, EventPayload, MqttClientConfiguration, QoS};
use log::{debug, error, info, warn};

use crate::app::ports::MessageLink;
use crate::config::SystemConfig;
use crate::error::LinkError;
use crate::inbound::{InboundMessage, InboundQueue};

/// Polls of the `connected` flag before a session attempt is abandoned.
const CONNECT_WAIT_POLLS: u32 = 50;
const CONNECT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Session state written by the client task, read by the loop.
#[derive(Default)]
struct SessionFlags {
    connected: AtomicBool,
    lost: AtomicBool,
}

pub struct MqttLink {
    url: String,
    client_id: String,
    username: Option<String>,
    password: Option<String>,
    command_topic: String,
    client: Option<EspMqttClient<'static>>,
    queue: Arc<InboundQueue>,
    flags: Arc<SessionFlags>,
}

impl MqttLink {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            url: config.broker_url(),
            client_id: config.client_id.clone(),
            username: config.mqtt_user.clone(),
            password: config.mqtt_password.clone(),
            command_topic: config.command_topic.clone(),
            client: None,
            queue: Arc::new(InboundQueue::new()),
            flags: Arc::new(SessionFlags::default()),
        }
    }

    fn open_client(&self) -> Result<EspMqttClient<'static>, LinkError> {
        let conf = MqttClientConfiguration {
            client_id: Some(&self.client_id),
            username: self.username.as_deref(),
            password: self.password.as_deref(),
            ..Default::default()
        };

        let queue = Arc::clone(&self.queue);
        let flags = Arc::clone(&self.flags);
        let command_topic = self.command_topic.clone();

        EspMqttClient::new_cb(&self.url, &conf, move |event| match event.payload() {
            EventPayload::Connected(_) => {
                flags.connected.store(true, Ordering::Release);
            }
            EventPayload::Disconnected => {
                flags.connected.store(false, Ordering::Release);
                flags.lost.store(true, Ordering::Release);
            }
            EventPayload::Received { topic, data, details, .. } => {
                let topic = topic.unwrap_or_default();
                if !matches!(details, Details::Complete) {
                    warn!("MQTT: dropping fragmented message on '{}'", topic);
                } else if topic == command_topic {
                    queue.push(topic, data);
                } else {
                    debug!("MQTT: ignoring message on '{}'", topic);
                }
            }
            EventPayload::Error(e) => {
                warn!("MQTT: client error: {:?}", e);
            }
            _ => {}
        })
        .map_err(|e| {
            error!("MQTT: client creation failed: {}", e);
            LinkError::ConnectFailed
        })
    }

    fn wait_connected(&self) -> bool {
        for _ in 0..CONNECT_WAIT_POLLS {
            if self.flags.connected.load(Ordering::Acquire) {
                return true;
            }
            thread::sleep(CONNECT_POLL_INTERVAL);
        }
        false
    }
}

impl MessageLink for MqttLink {
    fn connect(&mut self) -> Result<(), LinkError> {
        // Drop the old session first; its callback must not race the new one.
        self.client = None;
        self.queue.clear();
        self.flags.connected.store(false, Ordering::Release);
        self.flags.lost.store(false, Ordering::Release);

        info!("MQTT: connecting to {} as '{}'", self.url, self.client_id);
        let mut client = self.open_client()?;
        if !self.wait_connected() {
            error!("MQTT: broker did not acknowledge the session");
            return Err(LinkError::ConnectFailed);
        }

        client
            .subscribe(&self.command_topic, QoS::AtMostOnce)
            .map_err(|e| {
                error!("MQTT: subscribe to '{}' failed: {}", self.command_topic, e);
                LinkError::SubscribeFailed
            })?;
        info!("MQTT: connected, subscribed to '{}'", self.command_topic);

        self.client = Some(client);
        Ok(())
    }

    fn poll_message(&mut self) -> Result<Option<InboundMessage>, LinkError> {
        if let Some(msg) = self.queue.pop() {
            return Ok(Some(msg));
        }
        if self.client.is_none() || self.flags.lost.load(Ordering::Acquire) {
            return Err(LinkError::Disconnected);
        }
        Ok(None)
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), LinkError> {
        if self.flags.lost.load(Ordering::Acquire) {
            return Err(LinkError::Disconnected);
        }
        let client = self.client.as_mut().ok_or(LinkError::Disconnected)?;
        client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes())
            .map_err(|e| {
                error!("MQTT: publish to '{}' failed: {}", topic, e);
                LinkError::PublishFailed
            })?;
        Ok(())
    }
}
