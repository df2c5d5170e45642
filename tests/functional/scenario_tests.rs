//! Acceptance scenarios for the full transition check.
//!
//! Each scenario runs `TransitionValidator::validate`: release version policy
//! first, cluster stability only when the version changes.

use std::sync::Arc;

use crate::common::{CLUSTER_ID, ClusterBuilder, cluster, cluster_status, validator};
use release_admission::crd::ReleaseState;
use release_admission::lifecycle::ConditionKind::{Created, Creating, Updated, Updating};
use release_admission::stores::memory::{InMemoryClusterStatus, InMemoryReleaseCatalog};
use release_admission::stores::StoreError;
use release_admission::Error;

// ============================================================================
// Documented scenarios
// ============================================================================

/// Scenario A: identical versions are accepted without any reads.
#[tokio::test]
async fn test_scenario_a_identity() {
    let catalog = InMemoryReleaseCatalog::new();
    let status = cluster_status(&[Creating]);
    let validator = validator(&catalog, &status);

    validator
        .validate(&cluster("3.0.0"), &cluster("3.0.0"))
        .await
        .unwrap();

    assert_eq!(catalog.reads(), 0);
    assert_eq!(status.reads(), 0);
}

/// Scenario B: one major step to an active release is accepted.
#[tokio::test]
async fn test_scenario_b_major_step_to_active() {
    let catalog = InMemoryReleaseCatalog::new().with_release("v4.0.0", ReleaseState::Active);
    let status = cluster_status(&[Created, Creating]);
    let validator = validator(&catalog, &status);

    validator
        .validate(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap();
}

/// Scenario C: a deprecated target is rejected as not active.
#[tokio::test]
async fn test_scenario_c_deprecated_target() {
    let catalog = InMemoryReleaseCatalog::new().with_release("v3.2.0", ReleaseState::Deprecated);
    let status = cluster_status(&[Created]);
    let validator = validator(&catalog, &status);

    let err = validator
        .validate(&cluster("3.0.0"), &cluster("3.2.0"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not active"));
    assert_eq!(status.reads(), 0);
}

/// Scenario D: a target missing from the catalog is rejected.
#[tokio::test]
async fn test_scenario_d_missing_target() {
    let catalog = InMemoryReleaseCatalog::new();
    let status = cluster_status(&[Created]);
    let validator = validator(&catalog, &status);

    let err = validator
        .validate(&cluster("3.0.0"), &cluster("3.3.0"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

/// Scenario E: a backward major step is rejected whatever the catalog says.
#[tokio::test]
async fn test_scenario_e_backward_major() {
    for state in [
        ReleaseState::Active,
        ReleaseState::Deprecated,
        ReleaseState::Wip,
        ReleaseState::Deleted,
    ] {
        let catalog = InMemoryReleaseCatalog::new().with_release("v2.0.0", state);
        let status = cluster_status(&[Updated]);
        let validator = validator(&catalog, &status);

        let err = validator
            .validate(&cluster("3.0.0"), &cluster("2.0.0"))
            .await
            .unwrap_err();
        assert!(err.is_rejection(), "state {} should still reject", state);
    }

    let catalog = InMemoryReleaseCatalog::new();
    let status = cluster_status(&[Updated]);
    let err = validator(&catalog, &status)
        .validate(&cluster("3.0.0"), &cluster("2.0.0"))
        .await
        .unwrap_err();
    assert!(err.is_rejection());
}

/// Scenario F: a version change is blocked while the cluster is creating and
/// allowed once it is created.
#[tokio::test]
async fn test_scenario_f_creating_blocks_upgrade() {
    let catalog = InMemoryReleaseCatalog::new().with_release("v4.0.0", ReleaseState::Active);

    let creating = cluster_status(&[Creating]);
    let err = validator(&catalog, &creating)
        .validate(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap_err();
    assert_eq!(
        err.rejection().map(|r| r.reason()),
        Some("TransitionInProgress")
    );

    let created = cluster_status(&[Created, Creating]);
    validator(&catalog, &created)
        .validate(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap();
}

/// Updating blocks a further change, updated allows it.
#[tokio::test]
async fn test_update_cycle() {
    let catalog = InMemoryReleaseCatalog::new().with_release("v4.1.0", ReleaseState::Active);

    let updating = cluster_status(&[Updating, Created, Creating]);
    assert!(
        validator(&catalog, &updating)
            .validate(&cluster("4.0.0"), &cluster("4.1.0"))
            .await
            .is_err()
    );

    let updated = cluster_status(&[Updated, Updating, Created, Creating]);
    validator(&catalog, &updated)
        .validate(&cluster("4.0.0"), &cluster("4.1.0"))
        .await
        .unwrap();
}

// ============================================================================
// Dependency faults
// ============================================================================

#[tokio::test]
async fn test_catalog_fault_is_not_a_verdict() {
    let catalog = InMemoryReleaseCatalog::unavailable();
    let status = cluster_status(&[Created]);

    let err = validator(&catalog, &status)
        .validate(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap_err();
    assert!(err.is_dependency_fault());
    assert!(matches!(err, Error::CatalogUnavailable(StoreError::Backend(_))));
    assert_eq!(status.reads(), 0);
}

#[tokio::test]
async fn test_status_fault_is_not_a_verdict() {
    let catalog = InMemoryReleaseCatalog::new().with_release("v4.0.0", ReleaseState::Active);
    let status = InMemoryClusterStatus::unavailable();

    let err = validator(&catalog, &status)
        .validate(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::StatusUnavailable(_)));
}

#[tokio::test]
async fn test_unknown_cluster_is_a_fault() {
    let catalog = InMemoryReleaseCatalog::new().with_release("v4.0.0", ReleaseState::Active);
    let status = cluster_status(&[Created]);

    let other = |version: &str| ClusterBuilder::new("zzz99").release_version(version).build();
    let err = validator(&catalog, &status)
        .validate(&other("3.0.0"), &other("4.0.0"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::StatusUnavailable(StoreError::ClusterNotFound(_))
    ));
}

// ============================================================================
// Input faults
// ============================================================================

#[tokio::test]
async fn test_missing_label_rejected_without_reads() {
    let catalog = InMemoryReleaseCatalog::unavailable();
    let status = InMemoryClusterStatus::unavailable();

    let unlabeled = ClusterBuilder::new(CLUSTER_ID).build();
    let err = validator(&catalog, &status)
        .validate(&unlabeled, &cluster("4.0.0"))
        .await
        .unwrap_err();
    assert_eq!(
        err.rejection().map(|r| r.reason()),
        Some("MissingReleaseVersion")
    );
    assert_eq!(catalog.reads(), 0);
    assert_eq!(status.reads(), 0);
}

// ============================================================================
// Concurrency
// ============================================================================

/// One validator serves many concurrent requests with independent verdicts.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_validations() {
    let catalog = InMemoryReleaseCatalog::new()
        .with_release("v4.0.0", ReleaseState::Active)
        .with_release("v3.2.0", ReleaseState::Deprecated);
    let status = cluster_status(&[Updated]);
    let validator = Arc::new(validator(&catalog, &status));

    let mut handles = Vec::new();
    for i in 0..64 {
        let validator = validator.clone();
        handles.push(tokio::spawn(async move {
            let target = if i % 2 == 0 { "4.0.0" } else { "3.2.0" };
            let result = validator
                .validate(&cluster("3.0.0"), &cluster(target))
                .await;
            (i, result.is_ok())
        }));
    }

    for handle in handles {
        let (i, allowed) = handle.await.unwrap();
        assert_eq!(allowed, i % 2 == 0, "request {} got the wrong verdict", i);
    }

    assert_eq!(catalog.reads(), 64);
    // Only the allowed half reaches the status check
    assert_eq!(status.reads(), 32);
}
