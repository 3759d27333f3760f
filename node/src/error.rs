use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("registry error: {0}")]
    Registry(#[from] lendra_registry::RegistryError),

    #[error("store error: {0}")]
    Store(#[from] lendra_store::StoreError),

    #[error("database error: {0}")]
    Lmdb(#[from] lendra_store_lmdb::LmdbError),

    #[error("config error: {0}")]
    Config(String),

    #[error("data integrity: {0}")]
    Integrity(String),
}
