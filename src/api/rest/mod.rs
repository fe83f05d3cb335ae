pub mod deliveries;
pub mod drivers;
pub mod notifications;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;
use crate::storage;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(deliveries::router())
        .merge(drivers::router())
        .merge(notifications::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
        .fallback_service(ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    deliveries: i64,
    drivers: i64,
    unread_notifications: i64,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let (deliveries, drivers, unread_notifications) = state
        .db
        .read(|conn| {
            Ok((
                storage::deliveries::count(conn)?,
                storage::drivers::count(conn)?,
                storage::notifications::unread_count(conn)?,
            ))
        })
        .await?;

    Ok(Json(HealthResponse {
        status: "ok",
        deliveries,
        drivers,
        unread_notifications,
    }))
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
