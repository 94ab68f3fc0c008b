//! traindb - idempotent schema bootstrap for the training-platform document store
//!
//! Declares the platform's collections, validators, and indexes, and applies
//! them to a schema target. Re-running against an initialized target is a no-op.

pub mod catalog;
pub mod cli;
pub mod index;
pub mod init;
pub mod observability;
pub mod schema;
pub mod store;
