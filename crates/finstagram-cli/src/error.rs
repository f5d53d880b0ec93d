//! Errors that stop the binary.

use finstagram_client::ApiError;
use finstagram_store::StoreError;
use thiserror::Error;

/// Fatal startup or I/O errors.
///
/// Everything that happens after startup is handled inside the App; only
/// terminal I/O failures end the session early.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Reading commands or writing output failed.
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The state file could not be opened.
    #[error("state store: {0}")]
    Store(#[from] StoreError),

    /// The backend client could not be configured.
    #[error("backend client: {0}")]
    Api(#[from] ApiError),
}
