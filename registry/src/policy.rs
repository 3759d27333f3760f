//! Reporting authorization policy.

use lendra_types::CallerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Who may report loan outcomes into the registry.
///
/// The registry owner can always report. Beyond that, individual reporter
/// identities (a bank's origination system, a batch importer) can be granted
/// and later revoked. The policy is a plain identity set; there are no roles
/// and no expiry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPolicy {
    reporters: BTreeSet<CallerId>,
}

impl ReportingPolicy {
    /// Policy with no extra reporters.
    pub fn owner_only() -> Self {
        Self::default()
    }

    pub fn with_reporters(reporters: impl IntoIterator<Item = CallerId>) -> Self {
        Self {
            reporters: reporters.into_iter().collect(),
        }
    }

    /// Grant reporting rights. Returns false if already granted.
    pub fn grant(&mut self, reporter: CallerId) -> bool {
        self.reporters.insert(reporter)
    }

    /// Revoke reporting rights. Returns false if the caller was never granted.
    pub fn revoke(&mut self, reporter: &CallerId) -> bool {
        self.reporters.remove(reporter)
    }

    /// Whether `caller` may report outcomes in a registry owned by `owner`.
    pub fn allows(&self, caller: &CallerId, owner: &CallerId) -> bool {
        caller == owner || self.reporters.contains(caller)
    }

    pub fn reporter_count(&self) -> usize {
        self.reporters.len()
    }

    /// Granted reporters in sorted order.
    pub fn reporters(&self) -> impl Iterator<Item = &CallerId> {
        self.reporters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CallerId {
        CallerId::new(s)
    }

    #[test]
    fn owner_is_always_allowed() {
        let policy = ReportingPolicy::owner_only();
        assert!(policy.allows(&id("owner"), &id("owner")));
        assert_eq!(policy.reporter_count(), 0);
    }

    #[test]
    fn strangers_are_not_allowed() {
        let policy = ReportingPolicy::owner_only();
        assert!(!policy.allows(&id("stranger"), &id("owner")));
    }

    #[test]
    fn granted_reporter_is_allowed_until_revoked() {
        let mut policy = ReportingPolicy::owner_only();
        assert!(policy.grant(id("bank-core")));
        assert!(policy.allows(&id("bank-core"), &id("owner")));

        assert!(policy.revoke(&id("bank-core")));
        assert!(!policy.allows(&id("bank-core"), &id("owner")));
    }

    #[test]
    fn double_grant_and_blind_revoke_report_false() {
        let mut policy = ReportingPolicy::owner_only();
        assert!(policy.grant(id("bank-core")));
        assert!(!policy.grant(id("bank-core")));
        assert!(!policy.revoke(&id("never-granted")));
    }

    #[test]
    fn with_reporters_collects_and_dedups() {
        let policy =
            ReportingPolicy::with_reporters([id("a"), id("b"), id("a")]);
        assert_eq!(policy.reporter_count(), 2);

        let listed: Vec<_> = policy.reporters().map(|r| r.as_str()).collect();
        assert_eq!(listed, vec!["a", "b"]);
    }
}
