//! release-admission library crate
//!
//! Decides whether an update to a cluster resource may change its release
//! version. Exports the version model, the store traits the decision reads
//! through, the validation policies, and the admission webhook serving them.

pub mod config;
pub mod crd;
pub mod error;
pub mod health;
pub mod lifecycle;
pub mod stores;
pub mod version;
pub mod webhooks;

pub use config::{Config, FailurePolicy};
pub use error::{Error, Rejection};
pub use health::HealthState;
pub use version::ReleaseVersion;
pub use webhooks::{ClusterSnapshot, TransitionValidator, WebhookError, run_webhook_server};

use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;

/// Create namespaced or cluster-wide API based on scope
pub fn scoped_api<T>(client: Client, namespace: Option<&str>) -> Api<T>
where
    T: Resource<Scope = k8s_openapi::NamespaceResourceScope>,
    <T as Resource>::DynamicType: Default,
    T: Clone + DeserializeOwned + std::fmt::Debug,
{
    match namespace {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::all(client),
    }
}
