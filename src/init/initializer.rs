//! The bootstrap run
//!
//! Applies a catalog step by step, logging each step and aborting at the
//! first failure. Collections are ensured before any index, mirroring the
//! order application code depends on: a validator must be in place before
//! writes, an index before lookups.

use crate::catalog::Catalog;
use crate::observability::{Logger, Severity};

use super::errors::InitError;
use super::target::{Applied, SchemaTarget};

/// Counts of what a successful run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub collections_created: usize,
    pub collections_updated: usize,
    pub collections_unchanged: usize,
    pub indexes_created: usize,
    pub indexes_unchanged: usize,
}

impl InitReport {
    /// Whether the run found everything already in place.
    pub fn is_noop(&self) -> bool {
        self.collections_created == 0
            && self.collections_updated == 0
            && self.indexes_created == 0
    }

    fn record_collection(&mut self, applied: Applied) {
        match applied {
            Applied::Created => self.collections_created += 1,
            Applied::Updated => self.collections_updated += 1,
            Applied::Unchanged => self.collections_unchanged += 1,
        }
    }

    fn record_index(&mut self, applied: Applied) {
        match applied {
            Applied::Created => self.indexes_created += 1,
            // An updated index would have been a conflict instead
            Applied::Updated | Applied::Unchanged => self.indexes_unchanged += 1,
        }
    }
}

/// Applies the catalog to the target.
///
/// Idempotent: a second run over the same target succeeds and reports
/// nothing created. On error the remaining steps are skipped and the
/// target is left with whatever the completed steps established.
pub fn initialize<T: SchemaTarget>(catalog: &Catalog, target: &mut T) -> Result<InitReport, InitError> {
    let mut report = InitReport::default();

    for spec in &catalog.collections {
        let applied = target.ensure_collection(spec).map_err(log_failure)?;
        report.record_collection(applied);
        Logger::log(
            Severity::Info,
            "collection_ensured",
            &[("collection", spec.name.as_str()), ("applied", applied_str(applied))],
        );
    }

    for spec in &catalog.collections {
        for index in &spec.indexes {
            let applied = target
                .ensure_index(&spec.name, index)
                .map_err(log_failure)?;
            report.record_index(applied);
            Logger::log(
                Severity::Info,
                "index_ensured",
                &[
                    ("collection", spec.name.as_str()),
                    ("index", index.name().as_str()),
                    ("applied", applied_str(applied)),
                ],
            );
        }
    }

    Logger::log(
        Severity::Info,
        "database_initialized",
        &[
            ("collections", catalog.len().to_string().as_str()),
            ("noop", if report.is_noop() { "true" } else { "false" }),
        ],
    );

    Ok(report)
}

fn applied_str(applied: Applied) -> &'static str {
    match applied {
        Applied::Created => "created",
        Applied::Unchanged => "unchanged",
        Applied::Updated => "updated",
    }
}

fn log_failure(err: InitError) -> InitError {
    Logger::log_stderr(
        Severity::Error,
        "initialization_failed",
        &[
            ("collection", err.collection().unwrap_or("-")),
            ("error", err.to_string().as_str()),
        ],
    );
    err
}
