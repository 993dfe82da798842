pub mod api;
pub mod report;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(report::index))
        .route("/report", get(report::show))
        // Upload
        .route("/upload", post(report::upload))
        // API (JSON for charts)
        .route("/api/report/top-items", get(api::top_items))
        .route("/api/report/classes", get(api::classes))
        .route("/api/report/item-groups", get(api::item_groups))
        .route("/api/report/flow", get(api::flow))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
