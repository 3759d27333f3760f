//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use lendra_registry::ReportingPolicy;
use lendra_types::{CallerId, RegistryParams};

use crate::NodeError;

/// Configuration for a Lendra registry node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field except `owner` has
/// a default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Data directory for registry storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Identity of the registry owner. The only required field.
    pub owner: String,

    /// Callers granted loan-outcome reporting rights besides the owner.
    #[serde(default)]
    pub reporters: Vec<String>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum license-number length in bytes.
    #[serde(default = "default_max_license_len")]
    pub max_license_len: usize,

    /// Cap on officer approval limits, in raw units. Absent means uncapped.
    /// Kept at u64 because TOML integers do not reach the registry's full
    /// u128 amount range.
    #[serde(default)]
    pub max_approval_limit: Option<u64>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./lendra_data")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_license_len() -> usize {
    RegistryParams::DEFAULT_MAX_LICENSE_LEN
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// The owner identity as a registry caller.
    pub fn owner_id(&self) -> CallerId {
        CallerId::new(self.owner.clone())
    }

    /// Registry parameters derived from this configuration.
    pub fn registry_params(&self) -> RegistryParams {
        RegistryParams {
            max_license_len: self.max_license_len,
            max_approval_limit: self.max_approval_limit.map_or(u128::MAX, u128::from),
        }
    }

    /// Reporting policy granting each configured reporter.
    pub fn reporting_policy(&self) -> ReportingPolicy {
        ReportingPolicy::with_reporters(self.reporters.iter().cloned().map(CallerId::new))
    }

    /// Install the global tracing subscriber as configured.
    ///
    /// Call once, before [`RegistryNode::open`](crate::RegistryNode::open).
    /// Panics if a global subscriber has already been set.
    pub fn init_logging(&self) {
        crate::logging::init_logging(
            crate::logging::LogFormat::from_config(&self.log_format),
            &self.log_level,
        );
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            owner: "registry-owner".to_string(),
            reporters: Vec::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            max_license_len: default_max_license_len(),
            max_approval_limit: None,
        }
    }
}
