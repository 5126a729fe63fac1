//! Error types for fetching listings and building the detail view.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single listings request.
///
/// Every variant is shown to the user as the same generic error row; the
/// variant itself only ends up in the log.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure before a response arrived
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The API answered with a non-2xx status
    #[error("listings API returned {0}")]
    Status(StatusCode),
    /// The body was not a JSON array of listings
    #[error("failed to decode listings response: {0}")]
    Decode(String),
}

/// Why a listing cannot be shown in the detail dialog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("listing has no cover image (images.picture_url missing)")]
    MissingPicture,
    #[error("listing price is not numeric: {0}")]
    NonNumericPrice(String),
}
