/// WebSocket upgrade endpoint
///
/// `GET /ws` upgrades the connection and hands the socket to the hub's
/// connection loop. Subscribers receive every position published from the
/// moment they register; there is no history replay.
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, ws::connection};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(ws_upgrade))
}

/// GET /ws
async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, "WebSocket upgrade requested");
    }

    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| connection::handle_connection(socket, hub))
}
