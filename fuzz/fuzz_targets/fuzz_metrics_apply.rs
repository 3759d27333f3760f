#![no_main]

use libfuzzer_sys::fuzz_target;

use lendra_nullables::NullRegistryStore;
use lendra_registry::RegistryEngine;
use lendra_types::{
    CallerId, LedgerTime, LicenseNumber, LoanAmount, LoanOutcome, RegistryParams,
};

// Fuzz the metrics pipeline with arbitrary outcome/volume sequences.
// Ensures the engine never panics and rejected submissions never leave
// the stored counters inconsistent.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let approval_limit = u64::from_le_bytes([
        data[0], data[1], data[2], data[3],
        data[4], data[5], data[6], data[7],
    ])
    .max(1) as u128;

    let owner = CallerId::new("owner");
    let officer = CallerId::new("officer");
    let mut engine = RegistryEngine::new(
        owner.clone(),
        RegistryParams::registry_defaults(),
        NullRegistryStore::new(),
    );

    if engine
        .verify_officer(
            &owner,
            &officer,
            &LicenseNumber::new("LIC-FUZZ"),
            "Fuzz Bank",
            LoanAmount::new(approval_limit),
            LedgerTime::new(0),
        )
        .is_err()
    {
        return;
    }

    let remaining = &data[8..];
    let mut offset = 0;
    let mut now = 0u64;
    while offset + 9 <= remaining.len() {
        // Low bit selects the outcome, high bits the application delta,
        // so zero and bulk deltas both get exercised.
        let selector = remaining[offset];
        let outcome = if selector % 2 == 0 {
            LoanOutcome::Approved
        } else {
            LoanOutcome::Rejected
        };
        let delta = u64::from(selector >> 4);

        let volume = u64::from_le_bytes([
            remaining[offset + 1], remaining[offset + 2],
            remaining[offset + 3], remaining[offset + 4],
            remaining[offset + 5], remaining[offset + 6],
            remaining[offset + 7], remaining[offset + 8],
        ]) as u128;

        now = now.saturating_add(1);

        // This must never panic regardless of input; invalid volumes,
        // under-counting deltas and overflowing counters all come back
        // as errors.
        let _ = engine.update_metrics(
            &owner,
            &officer,
            delta,
            outcome,
            LoanAmount::new(volume),
            LedgerTime::new(now),
        );

        offset += 9;
    }

    // Whatever mix of accepted and rejected submissions ran, the stored
    // record must still satisfy the counter invariant.
    let metrics = engine
        .get_metrics(&officer)
        .ok()
        .flatten()
        .expect("verified officer keeps a record");
    assert!(metrics.is_consistent(), "metrics left inconsistent");

    let _ = engine.drain_events();
});
