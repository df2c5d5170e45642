//! Admission webhook server.
//!
//! Provides HTTP endpoints for Kubernetes admission webhooks:
//! - `/validate-cluster` - release version policy, then cluster stability
//! - `/validate-release-version` - release version policy only
//!
//! To enable webhooks:
//! 1. Deploy cert-manager for TLS certificates
//! 2. Create a ValidatingWebhookConfiguration for UPDATE operations
//! 3. Mount the TLS certificate secret to the pod at /etc/webhook/certs/
//!
//! Startup fails if the certificate or key file is missing.

use std::sync::Arc;
use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use tracing::{debug, error, info, warn};

use crate::config::FailurePolicy;
use crate::error::Error;
use crate::health::{HealthState, Verdict};
use crate::webhooks::policies::{ClusterSnapshot, TransitionValidator};

/// Message returned when a store read failed. Store errors stay in the logs.
pub const POLICY_UNAVAILABLE_MESSAGE: &str = "could not evaluate policy";

/// Which policy set an endpoint runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Release version policy and cluster stability
    Cluster,
    /// Release version policy only
    ReleaseVersion,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Cluster => "validate-cluster",
            Endpoint::ReleaseVersion => "validate-release-version",
        }
    }
}

/// Shared state for webhook handlers
pub struct WebhookState {
    pub validator: TransitionValidator,
    pub failure_policy: FailurePolicy,
    pub health_state: Arc<HealthState>,
}

impl WebhookState {
    pub fn new(
        validator: TransitionValidator,
        failure_policy: FailurePolicy,
        health_state: Arc<HealthState>,
    ) -> Self {
        Self {
            validator,
            failure_policy,
            health_state,
        }
    }
}

/// Create a denial response with reason embedded in message.
/// kube-rs deny() only sets status.message, so we format as "[reason] message"
fn deny_with_reason(
    request: &AdmissionRequest<DynamicObject>,
    message: &str,
    reason: &str,
) -> AdmissionReview<DynamicObject> {
    let full_message = format!("[{}] {}", reason, message);
    AdmissionResponse::from(request)
        .deny(full_message)
        .into_review()
}

/// Create the webhook router
pub fn create_webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/validate-cluster", post(validate_cluster))
        .route("/validate-release-version", post(validate_release_version))
        .with_state(state)
}

async fn validate_cluster(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> impl IntoResponse {
    let (status, review) = handle_review(&state, Endpoint::Cluster, review).await;
    (status, Json(review))
}

async fn validate_release_version(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> impl IntoResponse {
    let (status, review) = handle_review(&state, Endpoint::ReleaseVersion, review).await;
    (status, Json(review))
}

/// Evaluate one admission review and build the response review.
pub async fn handle_review(
    state: &WebhookState,
    endpoint: Endpoint,
    review: AdmissionReview<DynamicObject>,
) -> (StatusCode, AdmissionReview<DynamicObject>) {
    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            return (
                StatusCode::BAD_REQUEST,
                AdmissionResponse::invalid(format!("Invalid AdmissionReview: {}", e))
                    .into_review(),
            );
        }
    };

    let uid = &request.uid;
    debug!(
        uid = %uid,
        endpoint = endpoint.as_str(),
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = %request.name,
        "Processing admission request"
    );

    // Only UPDATE carries an old and a new release version to compare
    if request.operation != Operation::Update {
        debug!(uid = %uid, operation = ?request.operation, "Admission request allowed (not an UPDATE)");
        return (
            StatusCode::OK,
            AdmissionResponse::from(&request).into_review(),
        );
    }

    let (Some(new_object), Some(old_object)) = (&request.object, &request.old_object) else {
        error!(uid = %uid, "Missing object or oldObject in UPDATE request");
        return (
            StatusCode::OK,
            deny_with_reason(
                &request,
                "UPDATE request must carry both object and oldObject",
                "InvalidRequest",
            ),
        );
    };

    let old = ClusterSnapshot::from_resource(old_object);
    let new = ClusterSnapshot::from_resource(new_object);

    let started = Instant::now();
    let result = match endpoint {
        Endpoint::Cluster => state.validator.validate(&old, &new).await,
        Endpoint::ReleaseVersion => state.validator.release_version_valid(&old, &new).await,
    };
    let elapsed = started.elapsed().as_secs_f64();

    let (verdict, review) = match result {
        Ok(()) => {
            info!(uid = %uid, endpoint = endpoint.as_str(), "Admission request allowed");
            (
                Verdict::Allowed,
                AdmissionResponse::from(&request).into_review(),
            )
        }
        Err(Error::Rejected(rejection)) => {
            let reason = rejection.reason();
            let message = rejection.to_string();
            warn!(uid = %uid, reason = %reason, message = %message, "Admission request denied");
            (
                Verdict::Denied,
                deny_with_reason(&request, &message, reason),
            )
        }
        Err(fault) => (
            Verdict::Fault,
            fault_response(&request, &fault, state.failure_policy),
        ),
    };

    state
        .health_state
        .metrics
        .record_request(endpoint.as_str(), verdict, elapsed);

    (StatusCode::OK, review)
}

/// Answer a request whose policy could not be evaluated.
fn fault_response(
    request: &AdmissionRequest<DynamicObject>,
    fault: &Error,
    policy: FailurePolicy,
) -> AdmissionReview<DynamicObject> {
    error!(
        uid = %request.uid,
        error = %fault,
        failure_policy = ?policy,
        "Could not evaluate admission policy"
    );

    match policy {
        FailurePolicy::Fail => {
            deny_with_reason(request, POLICY_UNAVAILABLE_MESSAGE, "PolicyUnavailable")
        }
        FailurePolicy::Ignore => {
            let mut response = AdmissionResponse::from(request);
            response.warnings = Some(vec![format!(
                "{}; request allowed by failure policy",
                POLICY_UNAVAILABLE_MESSAGE
            )]);
            response.into_review()
        }
    }
}

/// Errors that can occur when running the webhook server
#[derive(Debug)]
pub enum WebhookError {
    /// TLS configuration error
    TlsConfig(String),
    /// Server error
    Server(String),
}

impl std::fmt::Display for WebhookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookError::TlsConfig(msg) => write!(f, "TLS configuration error: {}", msg),
            WebhookError::Server(msg) => write!(f, "Webhook server error: {}", msg),
        }
    }
}

impl std::error::Error for WebhookError {}

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0:`port` and serves the validation endpoints.
/// TLS certificates are loaded from the paths specified.
///
/// # Arguments
/// * `state` - Shared handler state (validator, failure policy, metrics)
/// * `port` - Port to listen on
/// * `cert_path` - Path to TLS certificate file (PEM format)
/// * `key_path` - Path to TLS private key file (PEM format)
pub async fn run_webhook_server(
    state: Arc<WebhookState>,
    port: u16,
    cert_path: &str,
    key_path: &str,
) -> Result<(), WebhookError> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let health_state = state.health_state.clone();
    let app = create_webhook_router(state);

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Webhook server listening with TLS");
    health_state.set_ready(true).await;

    axum_server::bind_rustls(addr, config)
        .serve(app.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()))?;

    Ok(())
}
