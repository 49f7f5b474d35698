use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use parking_lot::{Mutex, RwLock};
use proven_kubelet_summary::{
    DEFAULT_KUBELET_PORT, Error as SummaryError, Result as SummaryResult, Summary,
    SummaryProvider,
};

use crate::error::Error;

#[derive(Clone)]
enum NodeReply {
    Summary(Box<Summary>),
    NotFound,
    Status(StatusCode, String),
}

/// Scripted [`SummaryProvider`] keyed by host.
///
/// Hosts that were never scripted fail as if the connection was refused.
#[derive(Clone, Default)]
pub struct MockSummaryProvider {
    calls: Arc<Mutex<Vec<String>>>,
    nodes: Arc<RwLock<HashMap<String, NodeReply>>>,
}

impl MockSummaryProvider {
    /// Creates a provider with no hosts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers requests for `host` with `summary`.
    pub fn add_summary(&self, host: impl Into<String>, summary: Summary) {
        self.nodes
            .write()
            .insert(host.into(), NodeReply::Summary(Box::new(summary)));
    }

    /// Answers requests for `host` as if its kubelet has no summary endpoint.
    pub fn add_not_found(&self, host: impl Into<String>) {
        self.nodes.write().insert(host.into(), NodeReply::NotFound);
    }

    /// Answers requests for `host` with an unexpected status.
    pub fn add_status(&self, host: impl Into<String>, status: StatusCode, body: impl Into<String>) {
        self.nodes
            .write()
            .insert(host.into(), NodeReply::Status(status, body.into()));
    }

    /// Hosts requested so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SummaryProvider for MockSummaryProvider {
    async fn get_summary(&self, host: &str) -> SummaryResult<Summary> {
        self.calls.lock().push(host.to_string());

        let endpoint = format!("https://{host}:{DEFAULT_KUBELET_PORT}/stats/summary/");
        let reply = self.nodes.read().get(host).cloned();

        match reply {
            Some(NodeReply::Summary(summary)) => Ok(*summary),
            Some(NodeReply::NotFound) => Err(SummaryError::NotFound { endpoint }),
            Some(NodeReply::Status(status, body)) => Err(SummaryError::Status { status, body }),
            None => Err(SummaryError::Transport {
                endpoint,
                source: Box::new(Error::ConnectionRefused(host.to_string())),
            }),
        }
    }
}
