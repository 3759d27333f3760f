//! Metadata storage trait.

use crate::StoreError;

/// Trait for storing database metadata (schema version and similar
/// bookkeeping that doesn't belong in any domain-specific store).
pub trait MetaStore {
    /// Get the current database schema version. Fresh stores report 0.
    fn get_schema_version(&self) -> Result<u32, StoreError>;

    /// Set the database schema version.
    fn set_schema_version(&self, version: u32) -> Result<(), StoreError>;
}
