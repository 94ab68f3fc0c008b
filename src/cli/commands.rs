//! CLI command implementations

use std::path::Path;

use crate::catalog::training_platform;
use crate::init::initialize;
use crate::observability::{Logger, Severity};
use crate::store::Database;

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Database name the bootstrap targets
const DATABASE_NAME: &str = "training_platform";

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    match Cli::parse_args().command {
        Command::Init { data_dir, ephemeral } => init(&data_dir, ephemeral),
        Command::Status { data_dir } => status(&data_dir),
    }
}

/// Apply the training-platform catalog to the database at `data_dir`.
pub fn init(data_dir: &Path, ephemeral: bool) -> CliResult<()> {
    let mut db = if ephemeral {
        Database::in_memory(DATABASE_NAME)
    } else {
        Database::open(DATABASE_NAME, data_dir)?
    };

    let report = initialize(&training_platform(), &mut db)?;

    Logger::log(
        Severity::Info,
        "init_complete",
        &[
            ("database", DATABASE_NAME),
            ("collections_created", report.collections_created.to_string().as_str()),
            ("indexes_created", report.indexes_created.to_string().as_str()),
            ("noop", if report.is_noop() { "true" } else { "false" }),
        ],
    );
    Ok(())
}

/// Print the schema state recorded at `data_dir`, one line per collection.
pub fn status(data_dir: &Path) -> CliResult<()> {
    let db = Database::open(DATABASE_NAME, data_dir)?;

    for spec in db.schema_state() {
        let indexes = spec
            .indexes
            .iter()
            .map(|i| {
                if i.unique {
                    format!("{} (unique)", i.name())
                } else {
                    i.name()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        Logger::log(
            Severity::Info,
            "collection_status",
            &[
                ("collection", spec.name.as_str()),
                ("validator", if spec.validator.is_some() { "yes" } else { "no" }),
                ("indexes", if indexes.is_empty() { "-" } else { indexes.as_str() }),
            ],
        );
    }

    Ok(())
}
