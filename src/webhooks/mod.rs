//! Webhook module for validating cluster release transitions.
//!
//! This module provides ValidatingAdmissionWebhooks for UPDATE operations:
//! - Release version policy: target release active, single major step
//! - Cluster status policy: no version change while a transition is running

pub mod policies;
mod server;

pub use policies::{ClusterSnapshot, TransitionValidator};
pub use server::{
    Endpoint, POLICY_UNAVAILABLE_MESSAGE, WebhookError, WebhookState, create_webhook_router,
    handle_review, run_webhook_server,
};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
