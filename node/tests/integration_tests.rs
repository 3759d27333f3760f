//! Integration tests exercising the full registry node:
//! config → storage bootstrap → engine operations → LMDB persistence → readback.
//!
//! These tests wire together components that are normally only connected
//! inside `node.rs`, verifying the system works end-to-end — not just
//! in isolation.

use lendra_node::{NodeConfig, NodeError, RegistryNode};
use lendra_registry::RegistryError;
use lendra_store_lmdb::CURRENT_SCHEMA_VERSION;
use lendra_types::{CallerId, LicenseNumber, LoanAmount, LoanOutcome, OfficerStatus};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OWNER: &str = "bank-admin";

fn test_config(dir: &tempfile::TempDir) -> NodeConfig {
    NodeConfig {
        data_dir: dir.path().join("registry"),
        owner: OWNER.to_string(),
        ..NodeConfig::default()
    }
}

fn owner() -> CallerId {
    CallerId::new(OWNER)
}

fn officer(s: &str) -> CallerId {
    CallerId::new(s)
}

fn license(s: &str) -> LicenseNumber {
    LicenseNumber::new(s)
}

/// Helper: verify one officer with the stock license and limit.
fn verify(node: &mut RegistryNode, id: &str, lic: &str) {
    node.verify_officer(
        &owner(),
        &officer(id),
        &license(lic),
        "First National",
        LoanAmount::new(500_000),
    )
    .expect("verification should succeed");
}

// ---------------------------------------------------------------------------
// 1. Bootstrap and basic operation
// ---------------------------------------------------------------------------

#[test]
fn fresh_node_bootstraps_and_verifies() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut node = RegistryNode::open(test_config(&dir)).expect("open node");

    assert_eq!(node.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);

    verify(&mut node, "officer-1", "LIC123456");
    assert!(node.is_officer_verified(&officer("officer-1")).unwrap());

    let record = node.get_officer(&officer("officer-1")).unwrap().unwrap();
    assert_eq!(record.bank_name, "First National");
    assert_eq!(record.status, OfficerStatus::Active);
    assert_eq!(record.approval_limit, LoanAmount::new(500_000));

    let summary = node.summary().unwrap();
    assert_eq!(summary.total_officers, 1);
    assert_eq!(summary.active_officers, 1);
    assert_eq!(summary.licenses_indexed, 1);
}

#[test]
fn occupied_non_lmdb_data_dir_is_refused() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data_dir = dir.path().join("registry");
    std::fs::create_dir_all(&data_dir).expect("create dir");
    std::fs::write(data_dir.join("notes.txt"), b"definitely not lmdb").expect("write");

    let config = NodeConfig {
        data_dir,
        owner: OWNER.to_string(),
        ..NodeConfig::default()
    };
    let result = RegistryNode::open(config);
    assert!(matches!(result, Err(NodeError::Integrity(_))));
}

// ---------------------------------------------------------------------------
// 2. Persistence across restarts
// ---------------------------------------------------------------------------

#[test]
fn registry_state_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = test_config(&dir);

    {
        let mut node = RegistryNode::open(config.clone()).expect("open node");
        verify(&mut node, "officer-1", "LIC123456");
        node.update_metrics(
            &owner(),
            &officer("officer-1"),
            1,
            LoanOutcome::Approved,
            LoanAmount::new(250_000),
        )
        .expect("update should succeed");
    }

    let mut node = RegistryNode::open(config).expect("reopen node");
    assert!(node.is_officer_verified(&officer("officer-1")).unwrap());

    let metrics = node.get_metrics(&officer("officer-1")).unwrap().unwrap();
    assert_eq!(metrics.total_applications, 1);
    assert_eq!(metrics.approved_loans, 1);
    assert_eq!(metrics.total_volume, LoanAmount::new(250_000));

    // The license index survives too.
    let result = node.verify_officer(
        &owner(),
        &officer("officer-2"),
        &license("LIC123456"),
        "Second National",
        LoanAmount::new(500_000),
    );
    assert!(matches!(
        result,
        Err(NodeError::Registry(RegistryError::LicenseInUse { .. }))
    ));
}

// ---------------------------------------------------------------------------
// 3. Full officer lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_officer_lifecycle() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut node = RegistryNode::open(test_config(&dir)).expect("open node");

    verify(&mut node, "officer-1", "LIC123456");

    // Three approvals of 500k each, then two rejections.
    for _ in 0..3 {
        node.update_metrics(
            &owner(),
            &officer("officer-1"),
            1,
            LoanOutcome::Approved,
            LoanAmount::new(500_000),
        )
        .expect("approval should be recorded");
    }
    for _ in 0..2 {
        node.update_metrics(
            &owner(),
            &officer("officer-1"),
            1,
            LoanOutcome::Rejected,
            LoanAmount::ZERO,
        )
        .expect("rejection should be recorded");
    }

    let metrics = node.get_metrics(&officer("officer-1")).unwrap().unwrap();
    assert_eq!(metrics.total_applications, 5);
    assert_eq!(metrics.approved_loans, 3);
    assert_eq!(metrics.rejected_loans, 2);
    assert_eq!(metrics.total_volume, LoanAmount::new(1_500_000));

    let status = node
        .deactivate_officer(&owner(), &officer("officer-1"))
        .expect("deactivation should succeed");
    assert_eq!(status, OfficerStatus::Inactive);
    assert!(!node.is_officer_verified(&officer("officer-1")).unwrap());

    // No further outcomes, but the final counters stay readable.
    let result = node.update_metrics(
        &owner(),
        &officer("officer-1"),
        1,
        LoanOutcome::Approved,
        LoanAmount::new(100_000),
    );
    assert!(matches!(
        result,
        Err(NodeError::Registry(RegistryError::OfficerInactive(_)))
    ));
    let metrics = node.get_metrics(&officer("officer-1")).unwrap().unwrap();
    assert_eq!(metrics.total_applications, 5);
}

// ---------------------------------------------------------------------------
// 4. Configuration-driven policy and limits
// ---------------------------------------------------------------------------

#[test]
fn configured_reporters_can_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = NodeConfig {
        data_dir: dir.path().join("registry"),
        owner: OWNER.to_string(),
        reporters: vec!["bank-core".to_string()],
        ..NodeConfig::default()
    };
    let mut node = RegistryNode::open(config).expect("open node");
    verify(&mut node, "officer-1", "LIC123456");

    node.update_metrics(
        &officer("bank-core"),
        &officer("officer-1"),
        1,
        LoanOutcome::Rejected,
        LoanAmount::ZERO,
    )
    .expect("configured reporter should be allowed");

    let result = node.update_metrics(
        &officer("stranger"),
        &officer("officer-1"),
        1,
        LoanOutcome::Rejected,
        LoanAmount::ZERO,
    );
    assert!(matches!(
        result,
        Err(NodeError::Registry(RegistryError::Unauthorized { .. }))
    ));
}

#[test]
fn runtime_reporter_grants_are_honored() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut node = RegistryNode::open(test_config(&dir)).expect("open node");
    verify(&mut node, "officer-1", "LIC123456");

    let reporter = officer("late-addition");
    assert!(node.grant_reporter(reporter.clone()));
    assert!(!node.grant_reporter(reporter.clone()));

    node.update_metrics(
        &reporter,
        &officer("officer-1"),
        1,
        LoanOutcome::Approved,
        LoanAmount::new(50_000),
    )
    .expect("granted reporter should be allowed");

    assert!(node.revoke_reporter(&reporter));
    let result = node.update_metrics(
        &reporter,
        &officer("officer-1"),
        1,
        LoanOutcome::Rejected,
        LoanAmount::ZERO,
    );
    assert!(matches!(
        result,
        Err(NodeError::Registry(RegistryError::Unauthorized { .. }))
    ));
}

#[test]
fn approval_cap_from_config_is_enforced() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = NodeConfig {
        data_dir: dir.path().join("registry"),
        owner: OWNER.to_string(),
        max_approval_limit: Some(1_000_000),
        ..NodeConfig::default()
    };
    let mut node = RegistryNode::open(config).expect("open node");

    let result = node.verify_officer(
        &owner(),
        &officer("officer-1"),
        &license("LIC123456"),
        "First National",
        LoanAmount::new(2_000_000),
    );
    assert!(matches!(
        result,
        Err(NodeError::Registry(RegistryError::InvalidLimit { .. }))
    ));

    // Within the cap is fine.
    node.verify_officer(
        &owner(),
        &officer("officer-1"),
        &license("LIC123456"),
        "First National",
        LoanAmount::new(1_000_000),
    )
    .expect("limit within cap should be accepted");
}
