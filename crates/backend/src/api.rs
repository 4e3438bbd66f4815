use std::sync::Arc;

use axum::{extract::State, Json};
use dronewatch_shared::models::DataEnvelope;
use serde::Serialize;

use crate::assets::Assets;

pub async fn get_records(State(assets): State<Arc<Assets>>) -> Json<DataEnvelope> {
    tracing::debug!(count = assets.records.len(), "serving records");
    Json(DataEnvelope::success(assets.records.clone()))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "running",
        service: "Drone Detection Backend",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
