//! LMDB storage backend for the Lendra registry.
//!
//! Implements the storage traits from `lendra-store` using the `heed` LMDB
//! bindings. Each logical store maps to one or more LMDB databases within a
//! single environment.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod meta;
pub mod migration;
pub mod registry;

pub use environment::{LmdbEnvironment, DEFAULT_MAP_SIZE};
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityError, IntegrityReport};
pub use meta::LmdbMetaStore;
pub use migration::{Migrator, CURRENT_SCHEMA_VERSION};
pub use registry::LmdbRegistryStore;
