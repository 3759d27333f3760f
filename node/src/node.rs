//! The registry node — wires configuration, storage, and the engine together.

use lendra_registry::{RegistryEngine, RegistryEvent, RegistrySummary};
use lendra_store::{MetaStore, OfficerMetrics, OfficerRecord};
use lendra_store_lmdb::{
    check_data_dir, check_integrity, LmdbEnvironment, LmdbRegistryStore, Migrator,
    DEFAULT_MAP_SIZE,
};
use lendra_types::{CallerId, LedgerTime, LicenseNumber, LoanAmount, LoanOutcome, OfficerStatus};

use crate::config::NodeConfig;
use crate::error::NodeError;

/// A running registry node.
///
/// Owns the LMDB environment and the engine over it. Construction runs the
/// full storage bootstrap: data-directory check, schema migration, and the
/// record/license integrity sweep. Mutating operations stamp ledger time
/// from the system clock at this boundary and log the events the engine
/// emits.
pub struct RegistryNode {
    config: NodeConfig,
    env: LmdbEnvironment,
    engine: RegistryEngine<LmdbRegistryStore>,
}

impl RegistryNode {
    /// Open (or create) the registry at `config.data_dir`.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        check_data_dir(&config.data_dir).map_err(NodeError::Integrity)?;

        let env = LmdbEnvironment::open(&config.data_dir, DEFAULT_MAP_SIZE)?;
        Migrator::run(&env.meta_store())?;

        let report = check_integrity(&env)?;
        if !report.is_healthy() {
            for error in &report.errors {
                tracing::error!(%error, "registry integrity violation");
            }
            return Err(NodeError::Integrity(format!(
                "{} integrity violations in {}",
                report.errors.len(),
                config.data_dir.display()
            )));
        }

        let engine = RegistryEngine::with_policy(
            config.owner_id(),
            config.registry_params(),
            config.reporting_policy(),
            env.registry_store(),
        );

        let summary = engine.summary()?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            owner = %engine.owner(),
            reporters = engine.policy().reporter_count(),
            officers = summary.total_officers,
            active = summary.active_officers,
            "registry node ready"
        );

        Ok(Self {
            config,
            env,
            engine,
        })
    }

    /// Verify a new loan officer and return the created record. `caller`
    /// must be the registry owner.
    pub fn verify_officer(
        &mut self,
        caller: &CallerId,
        officer_id: &CallerId,
        license_number: &LicenseNumber,
        bank_name: &str,
        approval_limit: LoanAmount,
    ) -> Result<OfficerRecord, NodeError> {
        let record = self.engine.verify_officer(
            caller,
            officer_id,
            license_number,
            bank_name,
            approval_limit,
            LedgerTime::now(),
        )?;
        self.log_events();
        Ok(record)
    }

    /// Deactivate an officer. One-way; the record stays queryable.
    pub fn deactivate_officer(
        &mut self,
        caller: &CallerId,
        officer_id: &CallerId,
    ) -> Result<OfficerStatus, NodeError> {
        let status = self
            .engine
            .deactivate_officer(caller, officer_id, LedgerTime::now())?;
        self.log_events();
        Ok(status)
    }

    /// Whether an officer is present and active.
    pub fn is_officer_verified(&self, officer_id: &CallerId) -> Result<bool, NodeError> {
        Ok(self.engine.is_officer_verified(officer_id)?)
    }

    /// Record decided loan applications against an officer.
    /// `application_delta` is normally 1 per decided loan.
    pub fn update_metrics(
        &mut self,
        caller: &CallerId,
        officer_id: &CallerId,
        application_delta: u64,
        outcome: LoanOutcome,
        loan_volume: LoanAmount,
    ) -> Result<OfficerMetrics, NodeError> {
        let metrics = self.engine.update_metrics(
            caller,
            officer_id,
            application_delta,
            outcome,
            loan_volume,
            LedgerTime::now(),
        )?;
        self.log_events();
        Ok(metrics)
    }

    /// Full record for an officer, if one exists.
    pub fn get_officer(&self, officer_id: &CallerId) -> Result<Option<OfficerRecord>, NodeError> {
        Ok(self.engine.get_officer(officer_id)?)
    }

    /// Metrics for an officer, if a record exists.
    pub fn get_metrics(&self, officer_id: &CallerId) -> Result<Option<OfficerMetrics>, NodeError> {
        Ok(self.engine.get_metrics(officer_id)?)
    }

    /// Aggregate counts over the whole registry.
    pub fn summary(&self) -> Result<RegistrySummary, NodeError> {
        Ok(self.engine.summary()?)
    }

    /// Grant loan-outcome reporting rights for this process's lifetime.
    /// Persistent reporters belong in the configuration file.
    pub fn grant_reporter(&mut self, reporter: CallerId) -> bool {
        let granted = self.engine.policy_mut().grant(reporter.clone());
        if granted {
            tracing::info!(reporter = %reporter, "reporting rights granted");
        }
        granted
    }

    /// Revoke reporting rights granted at runtime or by configuration.
    pub fn revoke_reporter(&mut self, reporter: &CallerId) -> bool {
        let revoked = self.engine.policy_mut().revoke(reporter);
        if revoked {
            tracing::info!(reporter = %reporter, "reporting rights revoked");
        }
        revoked
    }

    /// Schema version of the underlying store.
    pub fn schema_version(&self) -> Result<u32, NodeError> {
        Ok(self.env.meta_store().get_schema_version()?)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn log_events(&mut self) {
        for event in self.engine.drain_events() {
            log_event(&event);
        }
    }
}

fn log_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::OfficerVerified {
            officer_id,
            license_number,
            bank_name,
            approval_limit,
            at,
        } => {
            tracing::info!(
                officer = %officer_id,
                license = %license_number,
                bank = %bank_name,
                limit = %approval_limit,
                at = %at,
                "officer verified"
            );
        }
        RegistryEvent::OfficerDeactivated { officer_id, at } => {
            tracing::info!(officer = %officer_id, at = %at, "officer deactivated");
        }
        RegistryEvent::MetricsUpdated {
            officer_id,
            outcome,
            loan_volume,
            metrics,
            at,
        } => {
            tracing::info!(
                officer = %officer_id,
                outcome = ?outcome,
                volume = %loan_volume,
                total = metrics.total_applications,
                approved = metrics.approved_loans,
                rejected = metrics.rejected_loans,
                at = %at,
                "loan outcome recorded"
            );
        }
    }
}
