pub mod handlers;
pub mod types;

use crate::{Error, Result, backend::HttpTodoBackend, config::Config};
use axum::{Router, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(state: AppState, route_path: &str) -> Router {
    Router::new()
        .route(route_path, post(handlers::relay))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    if !config.server.route_path.starts_with('/') {
        return Err(Error::config(format!(
            "route_path must start with '/', got '{}'",
            config.server.route_path
        )));
    }

    let backend = HttpTodoBackend::new(&config.backend)?;
    info!("Relaying todo requests to {}", backend.url());

    let app_state = AppState::new(Arc::new(backend), config.relay.clone());
    let app = router(app_state, &config.server.route_path);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} (route {})",
        addr, config.server.route_path
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
