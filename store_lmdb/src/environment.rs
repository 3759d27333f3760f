//! LMDB environment setup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::meta::LmdbMetaStore;
use crate::registry::LmdbRegistryStore;
use crate::LmdbError;

/// Default LMDB map size: 256 MiB, ample for a registry workload.
pub const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

/// Named databases hosted by the environment.
const MAX_DBS: u32 = 3;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) officers_db: Database<Bytes, Bytes>,
    pub(crate) licenses_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        fs::create_dir_all(path)
            .map_err(|e| LmdbError::Heed(format!("create data dir {}: {}", path.display(), e)))?;

        // SAFETY: the environment is opened once per process per path and
        // shared via Arc; nothing reopens the same directory concurrently.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)
        }
        .map_err(LmdbError::from)?;

        let mut wtxn = env.write_txn().map_err(LmdbError::from)?;
        let officers_db = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("officers"))
            .map_err(LmdbError::from)?;
        let licenses_db = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("licenses"))
            .map_err(LmdbError::from)?;
        let meta_db = env
            .create_database::<Bytes, Bytes>(&mut wtxn, Some("meta"))
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;

        Ok(Self {
            env: Arc::new(env),
            officers_db,
            licenses_db,
            meta_db,
        })
    }

    /// The raw heed environment.
    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    /// Registry store view over this environment.
    pub fn registry_store(&self) -> LmdbRegistryStore {
        LmdbRegistryStore {
            env: Arc::clone(&self.env),
            officers_db: self.officers_db,
            licenses_db: self.licenses_db,
        }
    }

    /// Metadata store view over this environment.
    pub fn meta_store(&self) -> LmdbMetaStore {
        LmdbMetaStore {
            env: Arc::clone(&self.env),
            meta_db: self.meta_db,
        }
    }
}
