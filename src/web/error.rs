use thiserror::Error;

use super::HttpError;

/// Transport-level reasons a web probe gives up early.
#[derive(Debug, Error)]
pub enum WebProbeError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("{url} answered with HTTP status {status}")]
    Status { url: String, status: u16 },
    #[error("{url} returned an empty page")]
    EmptyPage { url: String },
}
