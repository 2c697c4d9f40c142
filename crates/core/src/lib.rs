//! Pure domain logic for the fabrication-shop tracker.
//!
//! This crate has zero internal dependencies so that the derivation layer
//! (urgency classification, view sorting, workload aggregation) can be used
//! by the API, repositories, and any future CLI tooling without pulling in
//! sqlx or axum. Every function here is synchronous, pure, and reentrant:
//! callers pass in a fully materialized snapshot of records plus the current
//! date, and nothing reads ambient state.

pub mod error;
pub mod project;
pub mod role;
pub mod schedule;
pub mod types;
pub mod views;
pub mod workload;
