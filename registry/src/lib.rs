//! Loan officer verification registry.
//!
//! Officer lifecycle:
//! 1. **Verification**: the registry owner admits an officer under a unique
//!    license number with a positive approval limit.
//! 2. **Reporting**: authorized reporters record loan outcomes and the
//!    officer's metrics accumulate under checked arithmetic.
//! 3. **Deactivation**: the owner switches an officer off. One-way; the
//!    record and its metrics stay queryable and the license stays claimed.
//!
//! The engine is storage-agnostic (anything implementing
//! [`lendra_store::RegistryStore`]) and clockless: callers stamp every
//! mutating operation with the ledger time it executes at.

pub mod engine;
pub mod error;
pub mod events;
pub mod guards;
pub mod policy;

pub use engine::{RegistryEngine, RegistrySummary};
pub use error::{ErrorCategory, RegistryError};
pub use events::RegistryEvent;
pub use policy::ReportingPolicy;
