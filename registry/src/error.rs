use lendra_store::StoreError;
use lendra_types::{CallerId, LicenseNumber, LoanOutcome};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("caller {caller} may not {action}")]
    Unauthorized {
        caller: CallerId,
        action: &'static str,
    },

    #[error("invalid license number: {reason}")]
    InvalidLicense { reason: String },

    #[error("officer {0} is already verified")]
    AlreadyVerified(CallerId),

    #[error("license {license} is already held by officer {holder}")]
    LicenseInUse {
        license: LicenseNumber,
        holder: CallerId,
    },

    #[error("invalid approval limit {limit}: {reason}")]
    InvalidLimit { limit: u128, reason: String },

    #[error("no verification record for officer {0}")]
    NotFound(CallerId),

    #[error("officer {0} is already inactive")]
    AlreadyInactive(CallerId),

    #[error("officer {0} is inactive and accepts no further outcomes")]
    OfficerInactive(CallerId),

    #[error("loan volume {volume} is not valid for a {outcome:?} outcome")]
    InvalidVolume { outcome: LoanOutcome, volume: u128 },

    #[error("metrics counter overflow for officer {0}")]
    Overflow(CallerId),

    #[error(
        "metrics for officer {officer} break accounting: \
         {approved} approved + {rejected} rejected > {total} applications"
    )]
    MetricsInvariant {
        officer: CallerId,
        approved: u64,
        rejected: u64,
        total: u64,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Coarse error classification for callers that map registry failures onto
/// transport codes or log severities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Authorization,
    Validation,
    Conflict,
    NotFound,
    StateInvariant,
    Storage,
}

impl RegistryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized { .. } => ErrorCategory::Authorization,
            Self::InvalidLicense { .. }
            | Self::InvalidLimit { .. }
            | Self::InvalidVolume { .. } => ErrorCategory::Validation,
            Self::AlreadyVerified(_)
            | Self::LicenseInUse { .. }
            | Self::AlreadyInactive(_) => ErrorCategory::Conflict,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::OfficerInactive(_)
            | Self::Overflow(_)
            | Self::MetricsInvariant { .. } => ErrorCategory::StateInvariant,
            Self::Store(_) => ErrorCategory::Storage,
        }
    }
}
