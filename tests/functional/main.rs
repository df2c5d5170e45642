// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Functional tests for cluster release transition validation.
//!
//! These tests drive the validator end to end against in-memory stores,
//! WITHOUT requiring a Kubernetes cluster.
//!
//! ```bash
//! # Run all functional tests
//! cargo test --test functional
//!
//! # Run specific test
//! cargo test --test functional test_scenario_f_creating_blocks_upgrade
//! ```
//!
//! ## Test Categories
//!
//! - **Release version tests**: the release catalog table (same-major moves,
//!   major steps, deprecated and missing targets)
//! - **Cluster status tests**: lifecycle histories gating a version change
//! - **Scenario tests**: the documented acceptance scenarios, dependency
//!   faults, and concurrent use of one validator

#[path = "../common/mod.rs"]
mod common;

mod cluster_status_tests;
mod scenario_tests;
