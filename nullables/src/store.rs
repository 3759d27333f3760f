//! Nullable store — thread-safe in-memory storage for testing.

use lendra_store::{MetaStore, OfficerRecord, RegistryStore, StoreError};
use lendra_types::{CallerId, LicenseNumber};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory officer registry store for testing.
///
/// Keeps the same two maps a real backend keeps: records by officer id and
/// the license index. Both live behind one lock discipline (records first,
/// then licenses) so the dual-write in `insert_officer` is atomic.
pub struct NullRegistryStore {
    officers: Mutex<HashMap<String, OfficerRecord>>,
    licenses: Mutex<HashMap<String, String>>,
}

impl NullRegistryStore {
    pub fn new() -> Self {
        Self {
            officers: Mutex::new(HashMap::new()),
            licenses: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullRegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryStore for NullRegistryStore {
    fn get_officer(&self, officer_id: &CallerId) -> Result<Option<OfficerRecord>, StoreError> {
        Ok(self
            .officers
            .lock()
            .unwrap()
            .get(officer_id.as_str())
            .cloned())
    }

    fn get_license_holder(
        &self,
        license: &LicenseNumber,
    ) -> Result<Option<CallerId>, StoreError> {
        Ok(self
            .licenses
            .lock()
            .unwrap()
            .get(license.as_str())
            .map(|id| CallerId::new(id.clone())))
    }

    fn insert_officer(&self, record: &OfficerRecord) -> Result<(), StoreError> {
        let mut officers = self.officers.lock().unwrap();
        let mut licenses = self.licenses.lock().unwrap();

        if officers.contains_key(record.officer_id.as_str()) {
            return Err(StoreError::Corruption(format!(
                "insert over existing officer {}",
                record.officer_id
            )));
        }
        if licenses.contains_key(record.license_number.as_str()) {
            return Err(StoreError::Corruption(format!(
                "insert over indexed license {}",
                record.license_number
            )));
        }

        licenses.insert(
            record.license_number.as_str().to_string(),
            record.officer_id.as_str().to_string(),
        );
        officers.insert(record.officer_id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn update_officer(&self, record: &OfficerRecord) -> Result<(), StoreError> {
        let mut officers = self.officers.lock().unwrap();
        match officers.get_mut(record.officer_id.as_str()) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::Corruption(format!(
                "update of unknown officer {}",
                record.officer_id
            ))),
        }
    }

    fn officer_count(&self) -> Result<u64, StoreError> {
        Ok(self.officers.lock().unwrap().len() as u64)
    }

    fn license_count(&self) -> Result<u64, StoreError> {
        Ok(self.licenses.lock().unwrap().len() as u64)
    }

    fn iter_officers(&self) -> Result<Vec<OfficerRecord>, StoreError> {
        let mut records: Vec<_> = self.officers.lock().unwrap().values().cloned().collect();
        // Sorted so iteration order is deterministic across runs.
        records.sort_by(|a, b| a.officer_id.as_str().cmp(b.officer_id.as_str()));
        Ok(records)
    }
}

/// An in-memory metadata store for testing.
pub struct NullMetaStore {
    schema_version: Mutex<u32>,
}

impl NullMetaStore {
    pub fn new() -> Self {
        Self {
            schema_version: Mutex::new(0),
        }
    }
}

impl Default for NullMetaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaStore for NullMetaStore {
    fn get_schema_version(&self) -> Result<u32, StoreError> {
        Ok(*self.schema_version.lock().unwrap())
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        *self.schema_version.lock().unwrap() = version;
        Ok(())
    }
}
