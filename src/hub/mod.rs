//! Boundary to the host automation framework.
//!
//! Every reporting call returns an explicit result; failures are surfaced
//! to the caller instead of being swallowed at the call site.

use crate::config;
use crate::error::AppError;
use crate::nodes::DriverValue;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, MqttOptions, Outgoing, Packet, QoS};
use serde_json::json;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long [`MqttLink::disconnect`] waits for queued publishes to reach
/// the broker before giving up.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait NodeLink: Send + Sync {
    /// Register a node with the hub.
    async fn add_node(&self, address: &str, node_id: &str, name: &str) -> Result<(), AppError>;
    /// Report one driver value for a node.
    async fn report(&self, address: &str, value: &DriverValue) -> Result<(), AppError>;
    /// Put a notice in the hub's notice area.
    async fn send_notice(&self, key: &str, text: &str) -> Result<(), AppError>;
    async fn clear_notices(&self) -> Result<(), AppError>;
}

/// Hub link over MQTT. Node registrations, driver updates and notices are
/// published as JSON under the configured topic root.
pub struct MqttLink {
    client: AsyncClient,
    topic_root: String,
    event_loop: Mutex<Option<JoinHandle<()>>>,
}

impl MqttLink {
    pub fn connect(cfg: &config::Hub) -> Self {
        let mut mqttoptions = MqttOptions::new(&cfg.client_id, &cfg.address, cfg.port);
        mqttoptions.set_keep_alive(Duration::from_secs(5));

        let (client, mut connection) = AsyncClient::new(mqttoptions, 10);
        // Publishes only go out while the event loop is polled.
        let task = tokio::spawn(async move {
            loop {
                match connection.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => debug!("hub link connected"),
                    // The disconnect packet is written after every queued
                    // publish, so the link is flushed once it goes out.
                    Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                        debug!("hub link closed");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("hub link connection error: {e}");
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                }
            }
        });

        Self { client, topic_root: cfg.topic_root.clone(), event_loop: Mutex::new(Some(task)) }
    }

    /// Flush queued publishes and close the link. Publishes are only
    /// enqueued by [`NodeLink`] calls; nothing reaches the broker once the
    /// runtime drops, so exit paths call this first.
    pub async fn disconnect(&self) -> Result<(), AppError> {
        self.client.disconnect().await?;
        let task = self.event_loop.lock().await.take();
        if let Some(mut task) = task {
            if tokio::time::timeout(FLUSH_TIMEOUT, &mut task).await.is_err() {
                warn!("hub link did not flush within {FLUSH_TIMEOUT:?}");
                task.abort();
            }
        }
        Ok(())
    }

    async fn publish(&self, topic: String, payload: Vec<u8>) -> Result<(), AppError> {
        self.client.publish(topic, QoS::AtLeastOnce, false, payload).await?;
        Ok(())
    }
}

#[async_trait]
impl NodeLink for MqttLink {
    async fn add_node(&self, address: &str, node_id: &str, name: &str) -> Result<(), AppError> {
        let payload = serde_json::to_vec(&json!({
            "address": address,
            "node_id": node_id,
            "name": name,
        }))?;
        self.publish(format!("{}/node", self.topic_root), payload).await
    }

    async fn report(&self, address: &str, value: &DriverValue) -> Result<(), AppError> {
        let payload = serde_json::to_vec(&json!({
            "driver": value.driver.code(),
            "value": value.value,
            "uom": value.uom,
        }))?;
        self.publish(format!("{}/status/{}", self.topic_root, address), payload).await
    }

    async fn send_notice(&self, key: &str, text: &str) -> Result<(), AppError> {
        let payload = serde_json::to_vec(&json!({ "key": key, "text": text }))?;
        self.publish(format!("{}/notice", self.topic_root), payload).await
    }

    async fn clear_notices(&self) -> Result<(), AppError> {
        let payload = serde_json::to_vec(&json!({ "clear": "all" }))?;
        self.publish(format!("{}/notice", self.topic_root), payload).await
    }
}
