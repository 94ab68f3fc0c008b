//! Embedded document store for traindb
//!
//! A `Database` holds named collections; each collection enforces its
//! compiled validator and unique indexes on every write. A database can be
//! purely in-memory or backed by a metadata directory, in which case its
//! collection specs survive restarts and a re-run of the bootstrap finds
//! them already in place.
//!
//! Documents themselves live in memory only; the metadata directory stores
//! schema, never data.

mod collection;
mod database;
mod errors;
mod meta;

pub use collection::Collection;
pub use database::{CollectionChange, Database};
pub use errors::{StoreError, StoreResult};
pub use meta::MetaStore;
