//! Fundamental types for the Lendra registry.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! caller identities, license numbers, loan amounts, ledger timestamps, registry
//! parameters, and state enums.

pub mod amount;
pub mod identity;
pub mod params;
pub mod state;
pub mod time;

pub use amount::LoanAmount;
pub use identity::{CallerId, LicenseNumber};
pub use params::RegistryParams;
pub use state::{LoanOutcome, OfficerStatus};
pub use time::LedgerTime;
