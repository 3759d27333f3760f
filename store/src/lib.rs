//! Abstract storage traits for the Lendra registry.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the workspace depends only on the traits.

pub mod error;
pub mod meta;
pub mod officer;

pub use error::StoreError;
pub use meta::MetaStore;
pub use officer::{OfficerMetrics, OfficerRecord, RegistryStore};
