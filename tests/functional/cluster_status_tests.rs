//! Cluster status policy across lifecycle histories.

use crate::common::{cluster, cluster_status, release_catalog, validator};
use release_admission::lifecycle::ConditionKind::{self, Created, Creating, Updated, Updating};

struct Case {
    description: &'static str,
    conditions: &'static [ConditionKind],
    old: &'static str,
    new: &'static str,
    valid: bool,
}

const CASES: &[Case] = &[
    Case {
        description: "no upgrade while creating",
        conditions: &[Creating],
        old: "3.0.0",
        new: "3.0.0",
        valid: true,
    },
    Case {
        description: "cluster is creating",
        conditions: &[Creating],
        old: "3.0.0",
        new: "4.0.0",
        valid: false,
    },
    Case {
        description: "cluster is created",
        conditions: &[Created, Creating],
        old: "3.0.0",
        new: "4.0.0",
        valid: true,
    },
    Case {
        description: "cluster is updating",
        conditions: &[Updating, Created, Creating],
        old: "3.0.0",
        new: "4.0.0",
        valid: false,
    },
    Case {
        description: "cluster is updated",
        conditions: &[Updated, Updating, Created, Creating],
        old: "3.0.0",
        new: "4.0.0",
        valid: true,
    },
];

#[tokio::test]
async fn test_cluster_status_table() {
    for (i, case) in CASES.iter().enumerate() {
        let catalog = release_catalog();
        let status = cluster_status(case.conditions);
        let validator = validator(&catalog, &status);

        let result = validator
            .cluster_status_valid(&cluster(case.old), &cluster(case.new))
            .await;

        if case.valid {
            assert!(
                result.is_ok(),
                "case {} ({}): unexpected error {:?}",
                i,
                case.description,
                result
            );
        } else {
            let err = result.expect_err(case.description);
            assert_eq!(
                err.rejection().map(|r| r.reason()),
                Some("TransitionInProgress"),
                "case {} ({})",
                i,
                case.description
            );
        }

        assert_eq!(catalog.reads(), 0, "cluster status check must not read the catalog");
    }
}

#[tokio::test]
async fn test_empty_history_allows_change() {
    let catalog = release_catalog();
    let status = cluster_status(&[]);
    let validator = validator(&catalog, &status);

    validator
        .cluster_status_valid(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap();
    assert_eq!(status.reads(), 1);
}

#[tokio::test]
async fn test_deleting_cluster_blocks_change() {
    let catalog = release_catalog();
    let status = cluster_status(&[ConditionKind::Deleting, Updated]);
    let validator = validator(&catalog, &status);

    let err = validator
        .cluster_status_valid(&cluster("3.0.0"), &cluster("4.0.0"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Deleting"));
}
