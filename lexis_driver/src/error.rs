//! Contains the [`Error`] returned by the fallible steps of the driver.

use lexis_base::source_file;
use thiserror::Error;

/// Is an enumeration of the failures that stop the driver before or after the analysis.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Source(#[from] source_file::Error),

    #[error("failed to serialize the tokens: {0}")]
    Json(#[from] serde_json::Error),
}
