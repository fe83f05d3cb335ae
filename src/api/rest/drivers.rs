use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::api::flash;
use crate::engine::drivers;
use crate::error::AppError;
use crate::models::driver::NewDriver;
use crate::state::AppState;
use crate::views;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers))
        .route("/drivers/new", post(create_driver))
}

#[derive(Deserialize)]
pub struct CreateDriverForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

async fn list_drivers(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let drivers = drivers::list(&state.db).await?;
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::drivers::list(&drivers, &flashes))))
}

async fn create_driver(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<CreateDriverForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let back = Redirect::to("/drivers");

    let driver = match NewDriver::new(&form.name, &form.phone) {
        Ok(driver) => driver,
        Err(err) => return Ok((flash::error(jar, err.user_message()), back)),
    };

    drivers::create(&state.db, driver).await?;
    state.metrics.drivers_created_total.inc();

    Ok((flash::success(jar, "Driver added."), back))
}
