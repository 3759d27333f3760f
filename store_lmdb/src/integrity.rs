//! Registry database integrity checks.
//!
//! Run on startup to detect corruption early, before the node begins
//! accepting operations. The registry's core storage invariant is the
//! record/index pairing: every officer record's license has exactly one
//! index entry pointing back at that officer, and every index entry names
//! an existing record holding that license.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

/// A single inconsistency found during an integrity check.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("license '{license}' indexed to unknown officer '{officer}'")]
    DanglingLicense { license: String, officer: String },

    #[error("officer '{officer}' holds license '{license}' but the index has no entry for it")]
    MissingLicenseEntry { officer: String, license: String },

    #[error("license '{license}' is indexed to officer '{indexed}' but held by officer '{holder}'")]
    LicenseMismatch {
        license: String,
        indexed: String,
        holder: String,
    },

    #[error("stale index entry: license '{license}' indexed to officer '{officer}' who holds '{actual}'")]
    StaleLicenseEntry {
        license: String,
        officer: String,
        actual: String,
    },

    #[error("undecodable officer record under key '{key}': {reason}")]
    UndecodableRecord { key: String, reason: String },
}

/// Summary of an integrity check run.
#[derive(Debug)]
pub struct IntegrityReport {
    pub officers_checked: u64,
    pub licenses_checked: u64,
    pub errors: Vec<IntegrityError>,
}

impl IntegrityReport {
    /// Returns `true` if no errors were detected.
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check registry database integrity on startup.
///
/// Walks both databases and cross-checks them. Inconsistencies are recorded
/// in the report rather than causing a hard error, so a single bad entry
/// doesn't hide the rest.
pub fn check_integrity(env: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let mut report = IntegrityReport {
        officers_checked: 0,
        licenses_checked: 0,
        errors: Vec::new(),
    };

    let rtxn = env.env().read_txn().map_err(LmdbError::from)?;

    // Pass 1: every record's license must be indexed back to its holder.
    // Collect id -> license for decodable records for the reverse pass.
    let mut license_by_id: HashMap<Vec<u8>, Vec<u8>> = HashMap::new();
    for entry in env.officers_db.iter(&rtxn).map_err(LmdbError::from)? {
        let (id_key, value) = entry.map_err(LmdbError::from)?;
        report.officers_checked += 1;

        let record: lendra_store::OfficerRecord = match bincode::deserialize(value) {
            Ok(record) => record,
            Err(e) => {
                report.errors.push(IntegrityError::UndecodableRecord {
                    key: String::from_utf8_lossy(id_key).into_owned(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let license_key = record.license_number.as_str().as_bytes();
        license_by_id.insert(id_key.to_vec(), license_key.to_vec());

        match env.licenses_db.get(&rtxn, license_key).map_err(LmdbError::from)? {
            None => report.errors.push(IntegrityError::MissingLicenseEntry {
                officer: String::from_utf8_lossy(id_key).into_owned(),
                license: record.license_number.as_str().to_string(),
            }),
            Some(indexed) if indexed != id_key => {
                report.errors.push(IntegrityError::LicenseMismatch {
                    license: record.license_number.as_str().to_string(),
                    indexed: String::from_utf8_lossy(indexed).into_owned(),
                    holder: String::from_utf8_lossy(id_key).into_owned(),
                })
            }
            Some(_) => {}
        }
    }

    // Pass 2: every index entry must name an existing record holding it.
    for entry in env.licenses_db.iter(&rtxn).map_err(LmdbError::from)? {
        let (license_key, id_key) = entry.map_err(LmdbError::from)?;
        report.licenses_checked += 1;

        if env
            .officers_db
            .get(&rtxn, id_key)
            .map_err(LmdbError::from)?
            .is_none()
        {
            report.errors.push(IntegrityError::DanglingLicense {
                license: String::from_utf8_lossy(license_key).into_owned(),
                officer: String::from_utf8_lossy(id_key).into_owned(),
            });
            continue;
        }

        if let Some(actual) = license_by_id.get(id_key) {
            if actual.as_slice() != license_key {
                report.errors.push(IntegrityError::StaleLicenseEntry {
                    license: String::from_utf8_lossy(license_key).into_owned(),
                    officer: String::from_utf8_lossy(id_key).into_owned(),
                    actual: String::from_utf8_lossy(actual).into_owned(),
                });
            }
        }
    }

    Ok(report)
}

/// Check if the LMDB data directory looks valid before opening.
///
/// Nonexistent and empty directories are a fresh start. A directory that
/// holds files but no `data.mdb` suggests corruption or misconfiguration
/// and is refused.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(()); // Fresh start
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        let occupied = std::fs::read_dir(path)
            .map_err(|e| format!("cannot read data directory {}: {e}", path.display()))?
            .next()
            .is_some();
        if occupied {
            return Err(format!(
                "data directory {} is non-empty but has no data.mdb",
                path.display()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lendra_store::{OfficerMetrics, OfficerRecord, RegistryStore};
    use lendra_types::{CallerId, LedgerTime, LicenseNumber, LoanAmount, OfficerStatus};

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let env =
            LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("failed to open env");
        (dir, env)
    }

    fn test_record(id: &str, license: &str) -> OfficerRecord {
        OfficerRecord {
            officer_id: CallerId::new(id),
            license_number: LicenseNumber::new(license),
            bank_name: "First National".to_string(),
            verification_date: LedgerTime::new(1000),
            status: OfficerStatus::Active,
            approval_limit: LoanAmount::new(500_000),
            metrics: OfficerMetrics::default(),
        }
    }

    #[test]
    fn check_data_dir_fresh_path() {
        let result = check_data_dir(Path::new("/tmp/lendra_test_nonexistent_12345"));
        assert!(result.is_ok());
    }

    #[test]
    fn check_data_dir_accepts_empty_dir_refuses_occupied() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        assert!(check_data_dir(dir.path()).is_ok());

        std::fs::write(dir.path().join("stray.txt"), b"not a database").expect("write");
        assert!(check_data_dir(dir.path()).is_err());
    }

    #[test]
    fn healthy_report() {
        let report = IntegrityReport {
            officers_checked: 5,
            licenses_checked: 5,
            errors: Vec::new(),
        };
        assert!(report.is_healthy());
    }

    #[test]
    fn unhealthy_report() {
        let report = IntegrityReport {
            officers_checked: 5,
            licenses_checked: 5,
            errors: vec![IntegrityError::DanglingLicense {
                license: "LIC1".to_string(),
                officer: "ghost".to_string(),
            }],
        };
        assert!(!report.is_healthy());
    }

    #[test]
    fn clean_registry_passes() {
        let (_dir, env) = temp_env();
        let store = env.registry_store();
        store.insert_officer(&test_record("officer-1", "LIC1")).expect("insert");
        store.insert_officer(&test_record("officer-2", "LIC2")).expect("insert");

        let report = check_integrity(&env).expect("check");
        assert!(report.is_healthy());
        assert_eq!(report.officers_checked, 2);
        assert_eq!(report.licenses_checked, 2);
    }

    #[test]
    fn dangling_license_is_reported() {
        let (_dir, env) = temp_env();
        env.registry_store()
            .insert_officer(&test_record("officer-1", "LIC1"))
            .expect("insert");

        let mut wtxn = env.env().write_txn().expect("write_txn");
        env.licenses_db
            .put(&mut wtxn, b"LIC999", b"ghost")
            .expect("put");
        wtxn.commit().expect("commit");

        let report = check_integrity(&env).expect("check");
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            report.errors[0],
            IntegrityError::DanglingLicense { .. }
        ));
    }

    #[test]
    fn repointed_license_is_reported_from_both_sides() {
        let (_dir, env) = temp_env();
        let store = env.registry_store();
        store
            .insert_officer(&test_record("officer-1", "LIC1"))
            .expect("insert");
        store
            .insert_officer(&test_record("officer-2", "LIC2"))
            .expect("insert");

        // Repoint LIC1 at officer-2, who holds LIC2. The record walk sees
        // officer-1's license indexed elsewhere; the index walk sees the
        // LIC1 entry naming an officer who holds a different license.
        let mut wtxn = env.env().write_txn().expect("write_txn");
        env.licenses_db
            .put(&mut wtxn, b"LIC1", b"officer-2")
            .expect("put");
        wtxn.commit().expect("commit");

        let report = check_integrity(&env).expect("check");
        assert!(!report.is_healthy());
        assert_eq!(report.errors.len(), 2);
        assert!(matches!(
            &report.errors[0],
            IntegrityError::LicenseMismatch { license, indexed, holder }
                if license == "LIC1" && indexed == "officer-2" && holder == "officer-1"
        ));
        assert!(matches!(
            &report.errors[1],
            IntegrityError::StaleLicenseEntry { license, officer, actual }
                if license == "LIC1" && officer == "officer-2" && actual == "LIC2"
        ));
    }

    #[test]
    fn missing_license_entry_is_reported() {
        let (_dir, env) = temp_env();
        env.registry_store()
            .insert_officer(&test_record("officer-1", "LIC1"))
            .expect("insert");

        let mut wtxn = env.env().write_txn().expect("write_txn");
        env.licenses_db.delete(&mut wtxn, b"LIC1").expect("delete");
        wtxn.commit().expect("commit");

        let report = check_integrity(&env).expect("check");
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            report.errors[0],
            IntegrityError::MissingLicenseEntry { .. }
        ));
    }

    #[test]
    fn undecodable_record_is_reported() {
        let (_dir, env) = temp_env();

        let mut wtxn = env.env().write_txn().expect("write_txn");
        env.officers_db
            .put(&mut wtxn, b"broken", b"\xff\xff\xff")
            .expect("put");
        wtxn.commit().expect("commit");

        let report = check_integrity(&env).expect("check");
        assert_eq!(report.officers_checked, 1);
        assert!(matches!(
            report.errors[0],
            IntegrityError::UndecodableRecord { .. }
        ));
    }
}
