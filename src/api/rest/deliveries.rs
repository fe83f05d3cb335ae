use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::api::flash;
use crate::engine::{deliveries, drivers};
use crate::error::AppError;
use crate::models::delivery::{DeliveryStatus, NewDelivery};
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/deliveries/new", get(new_delivery_form).post(create_delivery))
        .route("/deliveries/:id", get(delivery_detail))
        .route("/deliveries/:id/status", post(update_status))
}

#[derive(Deserialize)]
pub struct CreateDeliveryForm {
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub estimated_delivery: String,
    #[serde(default)]
    pub driver_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusForm {
    #[serde(default)]
    pub status: String,
}

async fn dashboard(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let board = deliveries::dashboard(&state.db).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::deliveries::dashboard(&board, &flashes))))
}

async fn new_delivery_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let drivers = drivers::list(&state.db).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::deliveries::new_delivery(&drivers, &flashes))))
}

async fn create_delivery(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CreateDeliveryForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let retry = Redirect::to("/deliveries/new");

    let delivery = match NewDelivery::new(
        &form.order_number,
        &form.customer_name,
        &form.address,
        &form.estimated_delivery,
        form.driver_id.as_deref(),
    ) {
        Ok(delivery) => delivery,
        Err(err) => return Ok((flash::error(jar, err.user_message()), retry)),
    };

    match deliveries::create(&state.db, delivery).await {
        Ok(_) => {
            state.metrics.deliveries_created_total.inc();
            Ok((flash::success(jar, "Delivery created."), Redirect::to("/")))
        }
        Err(err @ AppError::Validation(_)) => Ok((flash::error(jar, err.user_message()), retry)),
        Err(err) => Err(err),
    }
}

async fn delivery_detail(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match deliveries::detail(&state.db, id).await {
        Ok(delivery) => {
            let (jar, flashes) = flash::take(jar);
            Ok((jar, Html(views::deliveries::detail(&delivery, &flashes))).into_response())
        }
        Err(err @ AppError::NotFound(_)) => {
            Ok((flash::error(jar, err.user_message()), Redirect::to("/")).into_response())
        }
        Err(err) => Err(err),
    }
}

async fn update_status(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i64>,
    Form(form): Form<UpdateStatusForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let detail = Redirect::to(&format!("/deliveries/{id}"));

    let status = match form.status.trim().parse::<DeliveryStatus>() {
        Ok(status) => status,
        Err(err) => {
            tracing::warn!(delivery_id = id, requested = %form.status, "rejected status value");
            return Ok((flash::error(jar, err.user_message()), detail));
        }
    };

    match deliveries::update_status(&state.db, id, status).await {
        Ok(_) => {
            state
                .metrics
                .status_updates_total
                .with_label_values(&[status.as_str()])
                .inc();
            Ok((flash::success(jar, "Status updated."), detail))
        }
        Err(err @ AppError::NotFound(_)) => {
            Ok((flash::error(jar, err.user_message()), Redirect::to("/")))
        }
        Err(err) => Err(err),
    }
}
