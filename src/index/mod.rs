//! Index subsystem for traindb
//!
//! Each collection owns an `IndexManager` holding the indexes the catalog
//! declares for it. Unique indexes forbid duplicate keys at write time and
//! at build time (over documents already present); non-unique indexes back
//! equality lookups.
//!
//! # Design Principles
//!
//! - Deterministic: BTreeMap ordering, sorted document ids
//! - Checked before applied: a rejected write leaves no index entry
//! - Missing key fields index as null, so they participate in uniqueness

mod errors;
mod key;
mod manager;

pub use errors::{IndexError, IndexErrorCode, IndexResult, Severity};
pub use key::IndexKey;
pub use manager::{Ensured, IndexManager};
