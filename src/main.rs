use std::time::{Duration, Instant};

use seatview::config::AppConfig;
use seatview::gauge::GaugeSampler;
use seatview::services::dashboard::DashboardPanel;
use seatview::services::publish::{MqttPublisher, publish_summary};
use seatview::services::sync::spawn_sync_task;
use seatview::state::{SelectedBuilding, SnapshotStore};
use seatview::summary::SeatSummary;
use seatview::telemetry::TelemetryClient;
use tokio::time::MissedTickBehavior;

/// Host clock period standing in for the render loop.
const HOST_TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let client = TelemetryClient::new(&config.api).expect("telemetry client init failed");
    tracing::info!(url = client.base_url(), building = %config.initial_building, "seatview starting");
    // Placement runs in the AR host, which builds its PlacementSession from these.
    tracing::info!(
        debounce_secs = config.placement.debounce_secs,
        anchor_offset = config.placement.anchor_offset,
        release_reset = ?config.placement.release_reset,
        "placement settings"
    );

    let store = SnapshotStore::new();
    let mut summaries = store.subscribe();
    let selection = SelectedBuilding::new(config.initial_building.clone());
    let mut dashboard = DashboardPanel::new(store.subscribe(), selection.clone(), config.history_capacity);
    let mut gauge = GaugeSampler::new(config.gauge, store.subscribe(), selection);
    let publisher = config.mqtt.as_ref().map(MqttPublisher::connect);

    let sync = spawn_sync_task(client, store, config.fetch_interval);

    let mut clock = tokio::time::interval(HOST_TICK);
    clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = clock.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                last = now;

                if let Some(snapshot) = summaries.take_changed() {
                    if let Some(publisher) = &publisher {
                        // Failures are logged inside; the next snapshot republishes.
                        let _ = publish_summary(publisher, &snapshot).await;
                    } else {
                        let payload = SeatSummary::from_snapshot(&snapshot).to_json();
                        tracing::info!(sequence = snapshot.sequence(), %payload, "seat summary");
                    }
                }
                if let Some(view) = dashboard.tick() {
                    tracing::info!(
                        building = ?view.building,
                        free = view.free,
                        occupied = view.occupied,
                        free_percent = view.free_percent,
                        floors = view.floors.len(),
                        "dashboard refreshed"
                    );
                }
                if let Some(angle) = gauge.tick(dt) {
                    tracing::debug!(angle, "gauge needle");
                }
            }
        }
    }

    tracing::info!("shutting down");
    if let Err(e) = sync.shutdown().await {
        tracing::error!(error = %e, "sync task ended abnormally");
    }
}
