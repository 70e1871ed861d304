//! MaintaBIT Server — Application entry point.

use anyhow::Result;
use maintabit_server::{bootstrap, config::Config, create_router, mailer::ServerMailer, sweep};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maintabit=info,tower_http=info".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(bind = %config.bind_address, "Starting MaintaBIT server...");

    let mailer = ServerMailer::from_config(config.mail_relay_url.as_deref(), &config.mail_from);
    if matches!(mailer, ServerMailer::Log(_)) {
        tracing::warn!("MAIL_RELAY_URL not set; emails will only be logged");
    }

    let state = bootstrap(&config, mailer).await?;
    let sweeper = sweep::spawn_otp_sweeper(state.clone(), config.otp_sweep_interval);

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!(bind = %config.bind_address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("MaintaBIT server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Graceful shutdown initiated");
}
