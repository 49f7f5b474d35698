use http::StatusCode;
use thiserror::Error;

/// Boxed error produced by a transport or a response body.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when fetching summary metrics.
#[derive(Debug, Error)]
pub enum Error {
    /// The request to the kubelet was cancelled before it completed.
    #[error("request to {endpoint} cancelled")]
    Cancelled {
        /// The endpoint that was being requested.
        endpoint: String,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {endpoint} - {source}")]
    Body {
        /// The endpoint that was requested.
        endpoint: String,

        /// The underlying body error.
        #[source]
        source: BoxError,
    },

    /// The response body is not a valid summary.
    #[error("failed to parse output. Response: {body:?}. Error: {source}")]
    Decode {
        /// The raw response body.
        body: String,

        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// No valid endpoint could be built for the host.
    #[error("invalid kubelet endpoint for host {host:?}: {source}")]
    InvalidEndpoint {
        /// The host that was given.
        host: String,

        /// The underlying URL error.
        #[source]
        source: url::ParseError,
    },

    /// The kubelet does not expose the summary endpoint.
    #[error("{endpoint:?} not found")]
    NotFound {
        /// The endpoint that returned 404.
        endpoint: String,
    },

    /// The kubelet answered with a status other than 200 or 404.
    #[error("request failed - {:?}, response: {body:?}", .status.to_string())]
    Status {
        /// The response status.
        status: StatusCode,

        /// The raw response body.
        body: String,
    },

    /// The request never completed.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// The endpoint that was requested.
        endpoint: String,

        /// The underlying transport error.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Returns `true` if the kubelet answered 404 for the summary endpoint.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Returns `true` if `err`, or any error in its source chain, is
/// [`Error::NotFound`].
#[must_use]
pub fn is_not_found(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);

    while let Some(err) = current {
        if err.downcast_ref::<Error>().is_some_and(Error::is_not_found) {
            return true;
        }

        current = err.source();
    }

    false
}
