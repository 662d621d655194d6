//! Axum-based HTTP read API over the latest price

use crate::error::{EpexError, Result};
use crate::pricing::{PriceCell, SlotTable, TimeSlot};
use crate::sensor::PriceSensor;
use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub cell: PriceCell,
    pub slots: SlotTable,
    pub sensor: PriceSensor,
}

#[derive(Serialize)]
struct SlotView {
    start: String,
    price_eur_mwh: f64,
    price_ct_kwh: f64,
}

impl From<&TimeSlot> for SlotView {
    fn from(slot: &TimeSlot) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            price_eur_mwh: slot.price,
            price_ct_kwh: slot.display_price(),
        }
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn price(State(state): State<AppState>) -> impl IntoResponse {
    let mut body = serde_json::json!({
        "sensor": state.sensor.info(),
        "price_ct_kwh": serde_json::Value::Null,
    });
    if let Some(snapshot) = state.cell.snapshot() {
        body["price_ct_kwh"] = serde_json::json!(snapshot.price_ct_kwh);
        body["price_eur_mwh"] = serde_json::json!(snapshot.price_eur_mwh);
        body["slot_start"] = serde_json::json!(snapshot.slot_start.to_rfc3339());
        body["updated_at"] = serde_json::json!(snapshot.updated_at.to_rfc3339());
        body["origin"] = serde_json::to_value(&snapshot.origin).unwrap_or_default();
    }
    Json(body)
}

async fn slots(State(state): State<AppState>) -> impl IntoResponse {
    let slots = state.slots.slots();
    let views: Vec<SlotView> = slots.iter().map(SlotView::from).collect();
    Json(views)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/price", get(price))
        .route("/api/slots", get(slots))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let router = build_router(state);
    let logger = crate::logging::get_logger("web");
    logger.info(&format!(
        "Starting web server; requested host={}, port={}",
        host, port
    ));

    let addr = match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, port),
        Err(_) => {
            logger.warn(&format!("Invalid host '{}'; falling back to 127.0.0.1", host));
            ([127, 0, 0, 1], port).into()
        }
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| EpexError::web(format!("Failed to bind {}: {}", addr, e)))?;
    let local_addr = listener.local_addr()?;
    logger.info(&format!(
        "Web server listening at http://{}:{} (API /api)",
        local_addr.ip(),
        local_addr.port()
    ));

    axum::serve(listener, router)
        .await
        .map_err(|e| EpexError::web(e.to_string()))?;
    Ok(())
}
