//! Shared test fixtures.

pub mod fixtures;

pub use fixtures::*;
