// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use skinhub_server::{
    api::router,
    config::Config,
    state::AppState,
    store::{InMemoryStore, Seed},
    telemetry::{self, LogFormat},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init(LogFormat::from_env());

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let seed = match &config.seed_file {
        Some(path) => match Seed::load(path) {
            Ok(seed) => {
                info!(
                    path = %path.display(),
                    users = seed.users.len(),
                    players = seed.players.len(),
                    "Loaded seed file"
                );
                seed
            }
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            warn!("SEED_FILE not set; starting with a single super admin (uid 1)");
            Seed::bootstrap()
        }
    };

    let addr = config.bind_addr();
    let base_url = config.base_url.clone();
    let state = AppState::new(InMemoryStore::from_seed(seed)).with_config(config);
    let app = router(state);

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Skinhub listening on http://{addr} (public URL {base_url}, docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server failed: {e}");
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
