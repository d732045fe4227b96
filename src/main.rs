use std::sync::Arc;

use orbitra::{
    arguments::{is_help_requested, print_help},
    cache::ExpiringStore,
    config::{self, Config},
    logger::{self, LogTag},
    observer::{MetricsRecorder, TrackerObserver},
    tracker::IssService,
    webserver::{self, state::AppState, ws::WsHub},
};

/// Main entry point for Orbitra
///
/// Wires the four systems together: expiring store, upstream tracker,
/// WebSocket hub and the webserver, then blocks until shutdown.
#[tokio::main]
async fn main() {
    logger::init();

    // Check for help request first (before any other processing)
    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "Orbitra starting up...");

    let cfg = Config::load();
    config::init_config(cfg.clone());
    logger::info(
        LogTag::Config,
        &format!(
            "Loaded configuration (port={}, upstream={})",
            cfg.port, cfg.iss_api_url
        ),
    );

    let metrics = MetricsRecorder::new();

    let position_cache = Arc::new(ExpiringStore::new());
    let sweeper = position_cache.spawn_sweeper(cfg.sweep_interval);

    let tracker = match IssService::new(
        &cfg.iss_api_url,
        cfg.fetch_freshness,
        cfg.request_timeout,
        Arc::clone(&metrics) as Arc<dyn TrackerObserver>,
    ) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            logger::error(
                LogTag::System,
                &format!("Failed to build upstream client: {}", e),
            );
            std::process::exit(1);
        }
    };

    let hub = WsHub::new(
        cfg.ws_buffer_size,
        Arc::clone(&metrics) as Arc<dyn TrackerObserver>,
    );

    let state = Arc::new(AppState::new(
        hub,
        position_cache,
        tracker,
        Arc::clone(&metrics),
    ));

    // Ctrl+C triggers graceful webserver shutdown
    if let Err(e) = ctrlc::set_handler(|| {
        logger::info(LogTag::System, "Interrupt received, shutting down...");
        webserver::shutdown();
    }) {
        logger::warning(
            LogTag::System,
            &format!("Failed to install interrupt handler: {}", e),
        );
    }

    if let Err(e) = webserver::start_server(state).await {
        logger::error(LogTag::System, &format!("Webserver failed: {}", e));
        sweeper.abort();
        std::process::exit(1);
    }

    sweeper.abort();
    logger::info(LogTag::System, "Orbitra stopped");
}
