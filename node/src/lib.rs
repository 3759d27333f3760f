//! Lendra registry node — configuration, logging, and storage assembly.
//!
//! [`RegistryNode`] is the embedding surface: open a configured data
//! directory and drive the registry operations against it. Opening runs the
//! full storage bootstrap (data-directory check, schema migration,
//! integrity sweep) before any operation is accepted.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::RegistryNode;
