//! State enums for officers and loan outcomes.

use serde::{Deserialize, Serialize};

/// The verification status of a loan officer.
///
/// Deactivation is one-way: no registry operation transitions an officer
/// back from `Inactive` to `Active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfficerStatus {
    /// Verified and in good standing.
    Active,
    /// Deactivated by the registry owner; record and metrics are retained.
    Inactive,
}

impl OfficerStatus {
    /// Whether the officer counts as verified for read-only queries.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether metrics updates may be recorded against this officer.
    pub fn accepts_metrics(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// The outcome of a processed loan application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanOutcome {
    /// The application was approved; the loan volume counts toward the officer.
    Approved,
    /// The application was rejected; it contributes no volume.
    Rejected,
}
