// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;
use std::process::ExitCode;

use coffee_shop_api::{
    api::router,
    auth::AuthGuard,
    config::{AuthSettings, LogFormat, ServerSettings, DEFAULT_LOG_FILTER},
    state::AppState,
    store::DrinkStore,
};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn run(server: ServerSettings) -> Result<(), Box<dyn Error>> {
    let auth = AuthSettings::from_env()?;
    let guard = AuthGuard::from_settings(&auth)?;
    info!(
        issuer = %auth.issuer()?,
        audience = %auth.audience,
        jwks_url = %guard.verifier().jwks().jwks_url(),
        "token verification configured"
    );

    let app = router(AppState::new(DrinkStore::new(), guard));
    let listener = TcpListener::bind(server.bind_addr).await?;
    info!(addr = %server.bind_addr, "coffee shop API listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let server = match ServerSettings::from_env() {
        Ok(server) => server,
        Err(e) => {
            init_tracing(LogFormat::default());
            error!(error = %e, "invalid server configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(server.log_format);

    match run(server).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
