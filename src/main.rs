use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use orderdesk::config::{CliArgs, Config};
use orderdesk::http;
use orderdesk::state::OrderState;
use orderdesk_core::OrderStore;
use orderdesk_memory::MemoryStore;
use orderdesk_sqlite::SqliteStore;

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);

    init_tracing(&config);

    let store: Arc<dyn OrderStore> = match config.database.url.as_str() {
        "memory" => Arc::new(MemoryStore::new()),
        url => Arc::new(SqliteStore::open(url).expect("Failed to open database")),
    };

    let state = Arc::new(OrderState::new(store));
    state.load().await.expect("Failed to load orders");

    // the logging view: subscribes to state changes like any other view would
    let mut events = state.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!(?event, "state changed");
        }
    });

    let app = http::router(state);
    let addr = config.listen_addr();

    tracing::info!(%addr, database = %config.database.url, "orderdesk listening");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down");
}
