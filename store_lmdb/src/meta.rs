//! LMDB implementation of MetaStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use lendra_store::{MetaStore, StoreError};

use crate::LmdbError;

const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

pub struct LmdbMetaStore {
    pub(crate) env: Arc<Env>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl MetaStore for LmdbMetaStore {
    fn get_schema_version(&self) -> Result<u32, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .meta_db
            .get(&rtxn, SCHEMA_VERSION_KEY)
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) if bytes.len() == 4 => {
                let arr: [u8; 4] = bytes.try_into().expect("checked length");
                Ok(u32::from_le_bytes(arr))
            }
            Some(_) => Err(LmdbError::Serialization(
                "schema_version has unexpected byte length".to_string(),
            ))?,
            None => Ok(0),
        }
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        let bytes = version.to_le_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, SCHEMA_VERSION_KEY, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;

    #[test]
    fn fresh_store_reports_version_zero() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("open");
        assert_eq!(env.meta_store().get_schema_version().expect("get"), 0);
    }

    #[test]
    fn version_roundtrips_and_persists() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        {
            let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("open");
            env.meta_store().set_schema_version(7).expect("set");
            assert_eq!(env.meta_store().get_schema_version().expect("get"), 7);
        }
        let env = LmdbEnvironment::open(dir.path(), 10 * 1024 * 1024).expect("reopen");
        assert_eq!(env.meta_store().get_schema_version().expect("get"), 7);
    }
}
