//! Stateless operation guards.
//!
//! Each guard checks one admission rule and reports the matching
//! [`RegistryError`]. Stateful checks (existing records, the license index)
//! are done by the engine against its store.

use crate::error::RegistryError;
use lendra_types::{CallerId, LicenseNumber, LoanAmount, LoanOutcome, RegistryParams};

/// Only the registry owner may manage officer records.
pub fn check_owner(
    caller: &CallerId,
    owner: &CallerId,
    action: &'static str,
) -> Result<(), RegistryError> {
    if caller != owner {
        return Err(RegistryError::Unauthorized {
            caller: caller.clone(),
            action,
        });
    }
    Ok(())
}

/// A license number must be non-empty and fit the registry's field width.
pub fn check_license(
    license: &LicenseNumber,
    params: &RegistryParams,
) -> Result<(), RegistryError> {
    if license.is_empty() {
        return Err(RegistryError::InvalidLicense {
            reason: "license number is empty".into(),
        });
    }
    if license.len() > params.max_license_len {
        return Err(RegistryError::InvalidLicense {
            reason: format!(
                "license number is {} bytes, maximum is {}",
                license.len(),
                params.max_license_len
            ),
        });
    }
    Ok(())
}

/// An approval limit must be positive and within the configured cap.
pub fn check_approval_limit(
    limit: LoanAmount,
    params: &RegistryParams,
) -> Result<(), RegistryError> {
    if limit.is_zero() {
        return Err(RegistryError::InvalidLimit {
            limit: limit.raw(),
            reason: "approval limit must be positive".into(),
        });
    }
    if limit.raw() > params.max_approval_limit {
        return Err(RegistryError::InvalidLimit {
            limit: limit.raw(),
            reason: format!("approval limit exceeds maximum {}", params.max_approval_limit),
        });
    }
    Ok(())
}

/// Approved loans must carry a strictly positive volume; rejected loans
/// must carry exactly zero.
pub fn check_loan_volume(outcome: LoanOutcome, volume: LoanAmount) -> Result<(), RegistryError> {
    let valid = match outcome {
        LoanOutcome::Approved => !volume.is_zero(),
        LoanOutcome::Rejected => volume.is_zero(),
    };
    if !valid {
        return Err(RegistryError::InvalidVolume {
            outcome,
            volume: volume.raw(),
        });
    }
    Ok(())
}
