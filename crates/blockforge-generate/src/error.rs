//! Remote backend failure modes.
//!
//! Every variant is recoverable: the orchestrator answers all of them the
//! same way, by falling back to the local assembler. The enum exists so the
//! fallback suggestion can say what actually went wrong.

use thiserror::Error;

/// Why a remote generation attempt produced no usable text.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never completed (DNS, connection, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {status}")]
    Http { status: u16 },

    /// The response body was not the shape we expect.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response parsed but carried no candidate text.
    #[error("backend returned an empty response")]
    Empty,
}
