use std::sync::Arc;

use log::info;
use matchday_persistence_memory::InMemoryMatchStore;
use matchday_push_webhook::PushAdapter;
use matchday_server_api::AppState;
use matchday_server_app::{build_application, ports::random::ThreadRandom};

use crate::config::ServerConfig;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    // a missing .env file is fine, the environment may already be set
    let _ = dotenvy::dotenv();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    logs::init_logger(config.log_file.as_ref());

    let push_adapter = match PushAdapter::from_url(config.push_webhook_url.as_deref()) {
        Ok(adapter) => adapter,
        Err(e) => {
            log::error!("Failed to set up push notifications: {}", e);
            std::process::exit(1);
        }
    };
    if matches!(push_adapter, PushAdapter::Log(_)) {
        info!("MATCHDAY_PUSH_WEBHOOK_URL not set, push notifications are only logged");
    }

    let app = Arc::new(build_application(
        Arc::new(InMemoryMatchStore::new()),
        Arc::new(push_adapter),
        Arc::new(ThreadRandom),
    ));
    let state = AppState::new(app, &config.jwt_secret);

    info!("Starting application");

    if let Err(e) =
        matchday_server_api::serve(state, &config.host, config.http_port, shutdown_signal()).await
    {
        log::error!("HTTP API failed: {}", e);
        std::process::exit(1);
    }

    info!("Shut down cleanly");
}
