use thiserror::Error;

/// Errors that can occur with finding the config or data directories.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Unable to find the config directory for folio.")]
    Config,
    #[error("Unable to find the data directory for folio.")]
    Data,
}
