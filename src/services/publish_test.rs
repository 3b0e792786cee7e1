use std::sync::Mutex;

use super::*;
use crate::telemetry::BuildingSurvey;

#[derive(Default)]
struct RecordingPublisher {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingPublisher {
    fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, payload: String) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Client("broker unavailable".into()));
        }
        self.sent.lock().unwrap().push(payload);
        Ok(())
    }
}

fn survey(id: u32, name: &str, free: u32, occupied: u32) -> BuildingSurvey {
    BuildingSurvey { id: Some(id), name: name.into(), free_count: free, occupied_count: occupied, floors: Vec::new() }
}

fn snapshot() -> Snapshot {
    Snapshot::new(
        4,
        vec![survey(111, "East Campus - Pool St", 120, 80), survey(115, "East Campus - Marshgate", 45, 55)],
    )
}

#[tokio::test]
async fn publish_summary_sends_seat_counts() {
    let publisher = RecordingPublisher::default();

    let payload = publish_summary(&publisher, &snapshot()).await.unwrap().unwrap();
    assert_eq!(publisher.sent(), vec![payload.clone()]);

    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "pool": { "free": 120, "occupied": 80 },
            "marshgate": { "free": 45, "occupied": 55 }
        })
    );
}

#[tokio::test]
async fn publish_summary_skips_snapshot_without_known_buildings() {
    let publisher = RecordingPublisher::default();
    let snapshot = Snapshot::new(1, vec![survey(42, "West Campus - Library", 1, 1)]);

    assert_eq!(publish_summary(&publisher, &snapshot).await, Ok(None));
    assert!(publisher.sent().is_empty());
}

#[tokio::test]
async fn publish_summary_returns_publisher_error() {
    let publisher = RecordingPublisher::failing();

    let err = publish_summary(&publisher, &snapshot()).await.unwrap_err();
    assert_eq!(err, PublishError::Client("broker unavailable".into()));
    assert_eq!(err.to_string(), "seat summary publish failed: broker unavailable");
}

#[tokio::test]
async fn publish_summary_works_through_trait_object() {
    let publisher: Box<dyn Publisher> = Box::new(RecordingPublisher::default());
    assert!(publish_summary(publisher.as_ref(), &snapshot()).await.unwrap().is_some());
}

#[tokio::test]
async fn mqtt_publisher_queues_while_broker_unreachable() {
    let config = MqttConfig {
        broker: "127.0.0.1".into(),
        port: 1,
        topic: "campus/seats".into(),
        client_id: "seatview-test".into(),
        keep_alive_secs: 60,
    };
    let publisher = MqttPublisher::connect(&config);
    assert_eq!(publisher.topic(), "campus/seats");

    // The client only queues; connection failures surface in the event loop.
    assert!(publish_summary(&publisher, &snapshot()).await.unwrap().is_some());
}
