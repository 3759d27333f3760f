//! Officer record storage trait.

use crate::StoreError;
use lendra_types::{CallerId, LedgerTime, LicenseNumber, LoanAmount, OfficerStatus};
use serde::{Deserialize, Serialize};

/// Running loan-processing counters for one officer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerMetrics {
    /// Applications processed, approved or not.
    pub total_applications: u64,
    pub approved_loans: u64,
    pub rejected_loans: u64,
    /// Sum of approved loan volume. Rejections contribute nothing here.
    pub total_volume: LoanAmount,
}

impl OfficerMetrics {
    /// Whether the counters satisfy the registry's accounting rule:
    /// every approval and rejection corresponds to a recorded application.
    pub fn is_consistent(&self) -> bool {
        self.approved_loans
            .checked_add(self.rejected_loans)
            .map_or(false, |outcomes| outcomes <= self.total_applications)
    }
}

/// A freshly verified officer has processed nothing.
impl Default for OfficerMetrics {
    fn default() -> Self {
        Self {
            total_applications: 0,
            approved_loans: 0,
            rejected_loans: 0,
            total_volume: LoanAmount::ZERO,
        }
    }
}

/// Per-officer information stored in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerRecord {
    /// Ledger identity the record is keyed by.
    pub officer_id: CallerId,
    /// License held by this officer; unique across the registry.
    pub license_number: LicenseNumber,
    pub bank_name: String,
    /// Ledger time at which verification was recorded.
    pub verification_date: LedgerTime,
    pub status: OfficerStatus,
    /// Largest single loan this officer may approve.
    pub approval_limit: LoanAmount,
    pub metrics: OfficerMetrics,
}

/// Trait for officer registry storage operations.
///
/// The registry keeps two maps: officer records keyed by id, and a license
/// index mapping each license back to its holder. Backends must keep the two
/// consistent — an index entry exists iff a record with that license exists.
pub trait RegistryStore {
    fn get_officer(&self, officer_id: &CallerId) -> Result<Option<OfficerRecord>, StoreError>;

    /// Look up which officer holds a license, if any.
    fn get_license_holder(&self, license: &LicenseNumber)
        -> Result<Option<CallerId>, StoreError>;

    /// Insert a new officer record together with its license index entry.
    ///
    /// The two writes are atomic: after a failure neither is visible.
    /// Callers guarantee the id and license are unused; a backend that finds
    /// either already present reports `Corruption`.
    fn insert_officer(&self, record: &OfficerRecord) -> Result<(), StoreError>;

    /// Rewrite an existing record in place. The license index is immutable
    /// after insert; updates never touch it.
    fn update_officer(&self, record: &OfficerRecord) -> Result<(), StoreError>;

    fn officer_count(&self) -> Result<u64, StoreError>;
    fn license_count(&self) -> Result<u64, StoreError>;
    fn iter_officers(&self) -> Result<Vec<OfficerRecord>, StoreError>;
}
