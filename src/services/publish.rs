//! Publish service — pushes the seat summary to an MQTT broker.
//!
//! DESIGN
//! ======
//! `Publisher` is the seam between the host loop and the broker, mirroring
//! `SurveySource` on the fetch side. `MqttPublisher` owns a `rumqttc` client
//! and a background task that drives its event loop; the client only queues
//! requests, the event loop does the network I/O and reconnects.
//!
//! ERROR HANDLING
//! ==============
//! A failed publish is logged and dropped. The next snapshot produces a fresh
//! payload, so nothing is retried.

use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::MqttConfig;
use crate::summary::SeatSummary;
use crate::telemetry::Snapshot;

/// Requests queued ahead of the event loop before publishing fails.
const REQUEST_CAPACITY: usize = 10;

/// Pause after a connection error before the event loop reconnects.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("seat summary publish failed: {0}")]
    Client(String),
}

// =============================================================================
// PUBLISHER
// =============================================================================

/// Anything that can deliver a seat summary payload.
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, payload: String) -> Result<(), PublishError>;
}

pub struct MqttPublisher {
    client: AsyncClient,
    topic: String,
    driver: JoinHandle<()>,
}

impl MqttPublisher {
    /// Create the client and spawn its event loop. Must be called inside a
    /// tokio runtime. The broker connection is made lazily by the event loop.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(config.client_id.clone(), config.broker.clone(), config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        info!(broker = %config.broker, port = config.port, topic = %config.topic, "mqtt publisher configured");
        let driver = tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(event) => trace!(?event, "mqtt event"),
                    Err(e) => {
                        warn!(error = %e, "mqtt connection error; reconnecting");
                        tokio::time::sleep(RECONNECT_DELAY).await;
                    }
                }
            }
        });

        Self { client, topic: config.topic.clone(), driver }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Drop for MqttPublisher {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[async_trait::async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, payload: String) -> Result<(), PublishError> {
        // Never wait on a full queue; a stalled broker must not hold up the host loop.
        self.client
            .try_publish(self.topic.as_str(), QoS::AtLeastOnce, false, payload)
            .map_err(|e| PublishError::Client(e.to_string()))
    }
}

// =============================================================================
// SUMMARY PUBLISHING
// =============================================================================

/// Build the seat summary for `snapshot` and hand it to `publisher`.
///
/// Returns the payload sent, or `None` when the snapshot holds none of the
/// known buildings.
///
/// # Errors
///
/// Returns the publisher's error after logging it.
pub async fn publish_summary<P>(publisher: &P, snapshot: &Snapshot) -> Result<Option<String>, PublishError>
where
    P: Publisher + ?Sized,
{
    let summary = SeatSummary::from_snapshot(snapshot);
    if summary.is_empty() {
        debug!(sequence = snapshot.sequence(), "no known buildings in snapshot; nothing to publish");
        return Ok(None);
    }

    let payload = summary.to_json();
    match publisher.publish(payload.clone()).await {
        Ok(()) => {
            info!(sequence = snapshot.sequence(), %payload, "seat summary published");
            Ok(Some(payload))
        }
        Err(e) => {
            warn!(error = %e, sequence = snapshot.sequence(), "seat summary publish failed");
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "publish_test.rs"]
mod tests;
