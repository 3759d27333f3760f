//! Nullable infrastructure for deterministic testing.
//!
//! Storage is abstracted behind the `lendra-store` traits; this crate
//! provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod store;

pub use store::{NullMetaStore, NullRegistryStore};
