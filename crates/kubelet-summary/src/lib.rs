//! Client for fetching summary metrics from kubelet `/stats/summary/` endpoints.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod error;
mod serde_null;
mod transport;
mod types;

pub use client::{
    DEFAULT_KUBELET_PORT, DEFAULT_READ_ONLY_PORT, KubeletClient, KubeletClientOptions, Scheme,
};
pub use error::{BoxError, Error, Result, is_not_found};
pub use transport::{ReqwestTransport, Transport};
pub use types::*;

use async_trait::async_trait;

/// Source of summary metrics for a node.
///
/// Implemented by [`KubeletClient`] for real kubelets. Collection loops should
/// depend on this trait so tests can substitute a scripted provider.
#[async_trait]
pub trait SummaryProvider
where
    Self: Send + Sync + 'static,
{
    /// Fetches summary metrics from the node reachable at `host`.
    ///
    /// Callers that want to skip nodes without a summary endpoint should
    /// check [`Error::is_not_found`] on the returned error.
    async fn get_summary(&self, host: &str) -> Result<Summary>;
}
