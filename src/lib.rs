//! Feature flag evaluation.
//!
//! [`evaluation::evaluate`] decides which variation of a flag a caller gets and
//! why. The rest of the crate serves that engine over HTTP: an in-memory flag
//! repository, API-key auth, and an analytics sink.

pub mod analytics;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod repository;
pub mod routes;
pub mod state;
