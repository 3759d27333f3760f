//! Events emitted by the registry engine.

use lendra_store::OfficerMetrics;
use lendra_types::{CallerId, LedgerTime, LicenseNumber, LoanAmount, LoanOutcome};
use serde::{Deserialize, Serialize};

/// Events emitted by the engine for the node to log and relay.
///
/// Every applied mutation produces exactly one event; rejected operations
/// emit nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A new officer entered the registry.
    OfficerVerified {
        officer_id: CallerId,
        license_number: LicenseNumber,
        bank_name: String,
        approval_limit: LoanAmount,
        at: LedgerTime,
    },
    /// An officer was switched off. One-way.
    OfficerDeactivated { officer_id: CallerId, at: LedgerTime },
    /// A loan outcome was recorded; `metrics` carries the post-update counters.
    MetricsUpdated {
        officer_id: CallerId,
        outcome: LoanOutcome,
        loan_volume: LoanAmount,
        metrics: OfficerMetrics,
        at: LedgerTime,
    },
}

impl RegistryEvent {
    /// The officer this event concerns.
    pub fn officer_id(&self) -> &CallerId {
        match self {
            Self::OfficerVerified { officer_id, .. }
            | Self::OfficerDeactivated { officer_id, .. }
            | Self::MetricsUpdated { officer_id, .. } => officer_id,
        }
    }

    /// Stable short name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OfficerVerified { .. } => "officer_verified",
            Self::OfficerDeactivated { .. } => "officer_deactivated",
            Self::MetricsUpdated { .. } => "metrics_updated",
        }
    }
}
