use axum::extract::State;
use axum::response::Redirect;
use axum::routing::post;
use axum::Router;
use axum_extra::extract::SignedCookieJar;

use crate::api::flash;
use crate::engine::notifications;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/notifications/read", post(mark_read))
}

async fn mark_read(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let updated = notifications::mark_all_read(&state.db).await?;
    state
        .metrics
        .notifications_marked_read_total
        .inc_by(updated as u64);

    Ok((
        flash::success(jar, "Notifications marked as read."),
        Redirect::to("/"),
    ))
}
