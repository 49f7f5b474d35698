use thiserror::Error;

/// Errors produced by the mock transport and its bodies.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The response body failed part way through.
    #[error("response body broken: {0}")]
    BrokenBody(String),

    /// The scripted reply refused the connection.
    #[error("connection refused by {0}")]
    ConnectionRefused(String),

    /// A request arrived with nothing scripted to answer it.
    #[error("no reply scripted for {0}")]
    Unscripted(String),
}
