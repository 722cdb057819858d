pub mod charts;
pub mod responses;
pub mod surveys;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(surveys::router(state.clone()))
        .merge(responses::router(state.clone()))
        .merge(charts::router(state))
}
