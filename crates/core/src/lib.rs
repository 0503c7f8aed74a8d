//! Domain logic for the client onboarding tracker.
//!
//! This crate has no I/O and no async: records come in as raw string rows,
//! leave as typed [`client::ClientRecord`]s, and every computation over
//! them (progress, merge, filtering, dashboard summary) is a pure function.

pub mod client;
pub mod columns;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod progress;
pub mod reconcile;
pub mod seed;
