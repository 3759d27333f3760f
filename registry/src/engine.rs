//! The registry engine — officer lifecycle and metrics rules in one place.

use crate::error::RegistryError;
use crate::events::RegistryEvent;
use crate::guards;
use crate::policy::ReportingPolicy;
use lendra_store::{OfficerMetrics, OfficerRecord, RegistryStore};
use lendra_types::{
    CallerId, LedgerTime, LicenseNumber, LoanAmount, LoanOutcome, OfficerStatus, RegistryParams,
};
use serde::{Deserialize, Serialize};

/// Aggregate registry counts for status reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub total_officers: u64,
    pub active_officers: u64,
    pub inactive_officers: u64,
    pub licenses_indexed: u64,
}

/// The registry engine drives all state transitions over a [`RegistryStore`].
///
/// The engine owns no clock: callers stamp every mutating operation with the
/// ledger time it executes at, so replaying the same operations yields the
/// same records. Events for applied mutations accumulate until the node
/// drains them.
pub struct RegistryEngine<S> {
    owner: CallerId,
    params: RegistryParams,
    policy: ReportingPolicy,
    store: S,
    /// Pending events for the node to process.
    pending_events: Vec<RegistryEvent>,
}

impl<S: RegistryStore> RegistryEngine<S> {
    /// Engine with an owner-only reporting policy.
    pub fn new(owner: CallerId, params: RegistryParams, store: S) -> Self {
        Self::with_policy(owner, params, ReportingPolicy::owner_only(), store)
    }

    pub fn with_policy(
        owner: CallerId,
        params: RegistryParams,
        policy: ReportingPolicy,
        store: S,
    ) -> Self {
        Self {
            owner,
            params,
            policy,
            store,
            pending_events: Vec::new(),
        }
    }

    pub fn owner(&self) -> &CallerId {
        &self.owner
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    pub fn policy(&self) -> &ReportingPolicy {
        &self.policy
    }

    /// Mutable policy access, for granting and revoking reporters at runtime.
    pub fn policy_mut(&mut self) -> &mut ReportingPolicy {
        &mut self.policy
    }

    /// Admit a new officer into the registry and return the created record.
    ///
    /// Owner-only. The license must be well-formed and unclaimed, the officer
    /// unknown, and the approval limit admissible. Checks run in that order:
    /// a caller probing with a bad license learns about authorization first,
    /// and an officer re-registering under a new license is reported as
    /// already verified rather than by whatever state the license is in.
    pub fn verify_officer(
        &mut self,
        caller: &CallerId,
        officer_id: &CallerId,
        license_number: &LicenseNumber,
        bank_name: &str,
        approval_limit: LoanAmount,
        now: LedgerTime,
    ) -> Result<OfficerRecord, RegistryError> {
        guards::check_owner(caller, &self.owner, "verify officers")?;
        guards::check_license(license_number, &self.params)?;

        if self.store.get_officer(officer_id)?.is_some() {
            return Err(RegistryError::AlreadyVerified(officer_id.clone()));
        }
        if let Some(holder) = self.store.get_license_holder(license_number)? {
            return Err(RegistryError::LicenseInUse {
                license: license_number.clone(),
                holder,
            });
        }

        guards::check_approval_limit(approval_limit, &self.params)?;

        let record = OfficerRecord {
            officer_id: officer_id.clone(),
            license_number: license_number.clone(),
            bank_name: bank_name.to_string(),
            verification_date: now,
            status: OfficerStatus::Active,
            approval_limit,
            metrics: OfficerMetrics::default(),
        };
        self.store.insert_officer(&record)?;

        self.pending_events.push(RegistryEvent::OfficerVerified {
            officer_id: officer_id.clone(),
            license_number: license_number.clone(),
            bank_name: record.bank_name.clone(),
            approval_limit,
            at: now,
        });

        Ok(record)
    }

    /// Switch an active officer off.
    ///
    /// Owner-only and one-way: the record and its metrics stay queryable,
    /// the license stays claimed, and nothing reactivates the officer.
    pub fn deactivate_officer(
        &mut self,
        caller: &CallerId,
        officer_id: &CallerId,
        now: LedgerTime,
    ) -> Result<OfficerStatus, RegistryError> {
        guards::check_owner(caller, &self.owner, "deactivate officers")?;

        let mut record = self
            .store
            .get_officer(officer_id)?
            .ok_or_else(|| RegistryError::NotFound(officer_id.clone()))?;

        if !record.status.is_active() {
            return Err(RegistryError::AlreadyInactive(officer_id.clone()));
        }

        record.status = OfficerStatus::Inactive;
        self.store.update_officer(&record)?;

        self.pending_events.push(RegistryEvent::OfficerDeactivated {
            officer_id: officer_id.clone(),
            at: now,
        });

        Ok(record.status)
    }

    /// Whether an officer is both present and active.
    ///
    /// Unknown officers and deactivated officers both read as unverified;
    /// only storage failures surface as errors.
    pub fn is_officer_verified(&self, officer_id: &CallerId) -> Result<bool, RegistryError> {
        Ok(self
            .store
            .get_officer(officer_id)?
            .is_some_and(|record| record.status.is_active()))
    }

    /// Record decided loan applications against an officer.
    ///
    /// Callers must be allowed by the reporting policy. The officer must be
    /// active, and the volume must match the outcome: approvals carry their
    /// volume, rejections carry none. `application_delta` is how many
    /// applications this report covers, normally 1 per decided loan.
    /// Counters move under checked arithmetic and the updated metrics are
    /// re-checked against the accounting rule before anything is written, so
    /// a delta that under-counts the reported outcome is rejected.
    pub fn update_metrics(
        &mut self,
        caller: &CallerId,
        officer_id: &CallerId,
        application_delta: u64,
        outcome: LoanOutcome,
        loan_volume: LoanAmount,
        now: LedgerTime,
    ) -> Result<OfficerMetrics, RegistryError> {
        if !self.policy.allows(caller, &self.owner) {
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                action: "report loan outcomes",
            });
        }

        let mut record = self
            .store
            .get_officer(officer_id)?
            .ok_or_else(|| RegistryError::NotFound(officer_id.clone()))?;

        if !record.status.accepts_metrics() {
            return Err(RegistryError::OfficerInactive(officer_id.clone()));
        }

        guards::check_loan_volume(outcome, loan_volume)?;

        let mut metrics = record.metrics;
        metrics.total_applications = metrics
            .total_applications
            .checked_add(application_delta)
            .ok_or_else(|| RegistryError::Overflow(officer_id.clone()))?;
        match outcome {
            LoanOutcome::Approved => {
                metrics.approved_loans = metrics
                    .approved_loans
                    .checked_add(1)
                    .ok_or_else(|| RegistryError::Overflow(officer_id.clone()))?;
                metrics.total_volume = metrics
                    .total_volume
                    .checked_add(loan_volume)
                    .ok_or_else(|| RegistryError::Overflow(officer_id.clone()))?;
            }
            LoanOutcome::Rejected => {
                metrics.rejected_loans = metrics
                    .rejected_loans
                    .checked_add(1)
                    .ok_or_else(|| RegistryError::Overflow(officer_id.clone()))?;
            }
        }

        if !metrics.is_consistent() {
            return Err(RegistryError::MetricsInvariant {
                officer: officer_id.clone(),
                approved: metrics.approved_loans,
                rejected: metrics.rejected_loans,
                total: metrics.total_applications,
            });
        }

        record.metrics = metrics;
        self.store.update_officer(&record)?;

        self.pending_events.push(RegistryEvent::MetricsUpdated {
            officer_id: officer_id.clone(),
            outcome,
            loan_volume,
            metrics,
            at: now,
        });

        Ok(metrics)
    }

    /// Full record for an officer, if one exists.
    pub fn get_officer(
        &self,
        officer_id: &CallerId,
    ) -> Result<Option<OfficerRecord>, RegistryError> {
        Ok(self.store.get_officer(officer_id)?)
    }

    /// Metrics for an officer, if a record exists. Inactive officers keep
    /// their final counters.
    pub fn get_metrics(
        &self,
        officer_id: &CallerId,
    ) -> Result<Option<OfficerMetrics>, RegistryError> {
        Ok(self.store.get_officer(officer_id)?.map(|r| r.metrics))
    }

    /// Aggregate counts over the whole registry.
    pub fn summary(&self) -> Result<RegistrySummary, RegistryError> {
        let officers = self.store.iter_officers()?;
        let total = officers.len() as u64;
        let active = officers.iter().filter(|o| o.status.is_active()).count() as u64;
        Ok(RegistrySummary {
            total_officers: total,
            active_officers: active,
            inactive_officers: total - active,
            licenses_indexed: self.store.license_count()?,
        })
    }

    /// Drain pending events for the node to process.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
