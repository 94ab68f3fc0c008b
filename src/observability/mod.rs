//! Observability for traindb
//!
//! Structured logging only: one JSON line per event, written synchronously,
//! with deterministic key ordering so runs can be diffed.

mod logger;

pub use logger::{Logger, Severity};
