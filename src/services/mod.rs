//! Long-lived services driven by the binary.
//!
//! ARCHITECTURE
//! ============
//! `sync` owns the fetch domain (a tokio task). `dashboard` lives in the host
//! tick domain and is the only consumer that records history. `publish`
//! forwards the seat summary of each new snapshot to the MQTT broker.

pub mod dashboard;
pub mod publish;
pub mod sync;
