//! Schema versioning for the registry database.
//!
//! The meta store carries a single monotonically increasing version number.
//! On startup the migrator walks from the stored version up to
//! [`CURRENT_SCHEMA_VERSION`] one step at a time, then stamps the result.

use lendra_store::MetaStore;

use crate::LmdbError;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Walks the stored schema forward to the version this build expects.
pub struct Migrator;

impl Migrator {
    /// Bring the database schema up to date.
    ///
    /// A stored version of 0 marks a fresh database. A stored version above
    /// [`CURRENT_SCHEMA_VERSION`] was written by a newer build and is
    /// refused rather than opened.
    pub fn run(meta_store: &impl MetaStore) -> Result<(), LmdbError> {
        let stored = meta_store
            .get_schema_version()
            .map_err(|e| LmdbError::Heed(e.to_string()))?;

        if stored == CURRENT_SCHEMA_VERSION {
            tracing::info!(version = stored, "schema is current");
            return Ok(());
        }
        if stored > CURRENT_SCHEMA_VERSION {
            return Err(LmdbError::Heed(format!(
                "schema version {stored} was written by a newer build \
                 (this build supports {CURRENT_SCHEMA_VERSION})"
            )));
        }

        for from in stored..CURRENT_SCHEMA_VERSION {
            tracing::info!(from, to = from + 1, "migrating schema");
            migrate_step(from)?;
        }

        meta_store
            .set_schema_version(CURRENT_SCHEMA_VERSION)
            .map_err(|e| LmdbError::Heed(e.to_string()))?;

        tracing::info!(version = CURRENT_SCHEMA_VERSION, "schema migration complete");
        Ok(())
    }
}

/// One migration step, from `from` to `from + 1`.
fn migrate_step(from: u32) -> Result<(), LmdbError> {
    match from {
        0 => {
            // v1 is the initial layout: officers, licenses and meta databases,
            // created empty by LmdbEnvironment::open. Nothing to rewrite.
            Ok(())
        }
        _ => Err(LmdbError::Heed(format!(
            "no migration path from schema version {from}"
        ))),
    }
}
