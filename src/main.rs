//! release-admission - validating webhook gating cluster release upgrades.
//!
//! This is the main entry point that:
//! - Initializes structured logging
//! - Loads configuration from the environment
//! - Creates the Kubernetes client and the stores validation reads through
//! - Starts the health server and the webhook server

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use kube::Client;
use tokio::signal;
use tracing::{error, info, warn};

use release_admission::health::{HealthState, run_health_server};
use release_admission::stores::kubernetes::{KubeClusterStatus, KubeReleaseCatalog};
use release_admission::webhooks::WebhookState;
use release_admission::{Config, TransitionValidator, run_webhook_server};

/// Grace period for in-flight admission requests to complete during shutdown
const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("release_admission=info".parse()?)
                .add_directive("kube=info".parse()?),
        )
        .json()
        .init();

    info!("Starting release-admission");

    // kube and axum-server both link rustls; pick the provider explicitly
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider already installed");
    }

    let config = Config::from_env()?;
    info!(
        webhook_port = config.webhook_port,
        health_port = config.health_port,
        failure_policy = ?config.failure_policy,
        store_read_timeout_secs = config.store_read_timeout.as_secs(),
        "Loaded configuration"
    );

    if !Path::new(&config.cert_path).exists() || !Path::new(&config.key_path).exists() {
        error!(
            cert_path = %config.cert_path,
            key_path = %config.key_path,
            "Webhook certificates not found"
        );
        return Err("webhook certificates not found".into());
    }

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let validator = TransitionValidator::new(
        Arc::new(KubeReleaseCatalog::new(
            client.clone(),
            config.store_read_timeout,
        )),
        Arc::new(KubeClusterStatus::new(client, config.store_read_timeout)),
    );

    // Create shared health state
    let health_state = Arc::new(HealthState::new());

    let health_handle = {
        let health_state = health_state.clone();
        let port = config.health_port;
        tokio::spawn(async move {
            if let Err(e) = run_health_server(health_state, port).await {
                error!("Health server error: {}", e);
            }
        })
    };

    let webhook_handle = {
        let state = Arc::new(WebhookState::new(
            validator,
            config.failure_policy,
            health_state.clone(),
        ));
        let config = config.clone();
        tokio::spawn(async move {
            if let Err(e) =
                run_webhook_server(state, config.webhook_port, &config.cert_path, &config.key_path)
                    .await
            {
                error!("Webhook server error: {}", e);
            }
        })
    };

    // Wait for any task to complete (or fail), or shutdown signal
    tokio::select! {
        result = webhook_handle => {
            if let Err(e) = result {
                error!("Webhook server task panicked: {}", e);
            }
        }
        result = health_handle => {
            if let Err(e) = result {
                error!("Health server task panicked: {}", e);
            }
        }
        // Handle graceful shutdown on SIGTERM or SIGINT
        _ = shutdown_signal() => {
            info!("Received shutdown signal, initiating graceful shutdown...");

            // Mark as not ready so the API server stops routing reviews here
            health_state.set_ready(false).await;
            info!("Marked webhook as not ready");

            info!(
                "Waiting {}s for in-flight admission requests to complete...",
                SHUTDOWN_GRACE_PERIOD_SECS
            );
            tokio::time::sleep(Duration::from_secs(SHUTDOWN_GRACE_PERIOD_SECS)).await;

            info!("Grace period complete, shutting down");
        }
    }

    info!("release-admission stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
///
/// Note: Signal handler setup failures are fatal - the webhook cannot shut down
/// gracefully without them. Using expect() here is intentional.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
