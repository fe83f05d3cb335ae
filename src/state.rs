use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::api::flash::signing_key;
use crate::observability::metrics::Metrics;
use crate::storage::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub cookie_key: Key,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: Database, secret_key: &str) -> Self {
        Self {
            db,
            cookie_key: signing_key(secret_key),
            metrics: Metrics::new(),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
