use axum::Router;
use std::sync::Arc;

use crate::webserver::state::AppState;

pub mod iss;
pub mod status;
pub mod ws;

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ws::routes())
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new().merge(iss::routes()).merge(status::routes())
}
