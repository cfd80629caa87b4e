use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SurrealDB error: {0}")]
    DbError(#[from] surrealdb::Error),
    #[error("Item is missing an Id.")]
    NoId,
    #[error("Item not found.")]
    NotFound,
    #[error("Failed to set database path: {0}")]
    DbPathSetError(std::path::PathBuf),
    #[error("Database not initialized")]
    DbNotInitialized,
}

pub type StorageResult<T> = Result<T, Error>;
