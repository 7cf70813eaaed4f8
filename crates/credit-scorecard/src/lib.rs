//! Credit scorecard for small-business loan applications.
//!
//! The `underwriting` module holds the pure scoring engine together with the
//! intake parsing, wizard state machine, and policy snapshot store that feed
//! it. Configuration, telemetry, and the top-level error type support the HTTP
//! service built on top of it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod underwriting;
