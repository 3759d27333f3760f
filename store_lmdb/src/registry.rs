//! LMDB implementation of RegistryStore.
//!
//! Officer records live in `officers` keyed by officer id, bincode-encoded.
//! The license index lives in `licenses`, mapping each license string to the
//! id of its holder. `insert_officer` writes both inside one transaction so
//! the pair is committed or rolled back together.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use lendra_store::{OfficerRecord, RegistryStore, StoreError};
use lendra_types::{CallerId, LicenseNumber};

use crate::LmdbError;

pub struct LmdbRegistryStore {
    pub(crate) env: Arc<Env>,
    pub(crate) officers_db: Database<Bytes, Bytes>,
    pub(crate) licenses_db: Database<Bytes, Bytes>,
}

impl RegistryStore for LmdbRegistryStore {
    fn get_officer(&self, officer_id: &CallerId) -> Result<Option<OfficerRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .officers_db
            .get(&rtxn, officer_id.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        match bytes {
            Some(bytes) => {
                let record = bincode::deserialize(bytes).map_err(|e| {
                    StoreError::Corruption(format!("officer record for {}: {}", officer_id, e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn get_license_holder(
        &self,
        license: &LicenseNumber,
    ) -> Result<Option<CallerId>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .licenses_db
            .get(&rtxn, license.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let id = std::str::from_utf8(bytes).map_err(|e| {
                    StoreError::Corruption(format!("license index for {}: {}", license, e))
                })?;
                Ok(Some(CallerId::new(id)))
            }
            None => Ok(None),
        }
    }

    fn insert_officer(&self, record: &OfficerRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let id_key = record.officer_id.as_str().as_bytes();
        let license_key = record.license_number.as_str().as_bytes();

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        if self
            .officers_db
            .get(&wtxn, id_key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Corruption(format!(
                "insert over existing officer {}",
                record.officer_id
            )));
        }
        if self
            .licenses_db
            .get(&wtxn, license_key)
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Corruption(format!(
                "insert over indexed license {}",
                record.license_number
            )));
        }

        self.officers_db
            .put(&mut wtxn, id_key, &bytes)
            .map_err(LmdbError::from)?;
        self.licenses_db
            .put(&mut wtxn, license_key, id_key)
            .map_err(LmdbError::from)?;
        // One commit covers both databases; an abort leaves neither visible.
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn update_officer(&self, record: &OfficerRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let id_key = record.officer_id.as_str().as_bytes();

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        if self
            .officers_db
            .get(&wtxn, id_key)
            .map_err(LmdbError::from)?
            .is_none()
        {
            return Err(StoreError::Corruption(format!(
                "update of unknown officer {}",
                record.officer_id
            )));
        }
        self.officers_db
            .put(&mut wtxn, id_key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn officer_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.officers_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn license_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.licenses_db.len(&rtxn).map_err(LmdbError::from)?)
    }

    fn iter_officers(&self) -> Result<Vec<OfficerRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut records = Vec::new();
        for entry in self.officers_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, value) = entry.map_err(LmdbError::from)?;
            let record: OfficerRecord = bincode::deserialize(value).map_err(|e| {
                StoreError::Corruption(format!(
                    "officer record for {}: {}",
                    String::from_utf8_lossy(key),
                    e
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
