//! Registry parameters — the deployment-tunable limits.

use serde::{Deserialize, Serialize};

/// Registry-level parameters stored by every node.
///
/// Defaults are deliberately permissive; a deployment tightens them through
/// its node configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// Maximum license-number length in bytes. Default: 50.
    pub max_license_len: usize,

    /// Maximum admissible approval limit (raw units).
    /// Default: `u128::MAX`, i.e. uncapped.
    pub max_approval_limit: u128,
}

impl RegistryParams {
    /// Default cap on license-number length.
    pub const DEFAULT_MAX_LICENSE_LEN: usize = 50;

    /// Lendra defaults — the intended configuration for a fresh deployment.
    pub fn registry_defaults() -> Self {
        Self {
            max_license_len: Self::DEFAULT_MAX_LICENSE_LEN,
            max_approval_limit: u128::MAX,
        }
    }
}

/// Default is the standard registry configuration.
impl Default for RegistryParams {
    fn default() -> Self {
        Self::registry_defaults()
    }
}
