use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use http_body::{Body, Frame, SizeHint};
use parking_lot::Mutex;
use proven_kubelet_summary::Transport;
use tracing::debug;

use crate::error::Error;

/// A scripted answer for one request.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Respond with `status` and `body`.
    Respond {
        /// Response status.
        status: StatusCode,
        /// Response body.
        body: Bytes,
    },

    /// Respond with `status`, then fail while the body is read.
    BrokenBody {
        /// Response status.
        status: StatusCode,
    },

    /// Fail without a response, as if the connection was refused.
    Refuse,

    /// Wait before giving the inner reply.
    Delay(Duration, Box<MockReply>),
}

impl MockReply {
    /// A 200 response with `body`.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::status(StatusCode::OK, body)
    }

    /// A response with any status and `body`.
    pub fn status(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
        }
    }

    /// An empty 404 response.
    #[must_use]
    pub const fn not_found() -> Self {
        Self::Respond {
            status: StatusCode::NOT_FOUND,
            body: Bytes::new(),
        }
    }

    /// Delays this reply by `delay`.
    #[must_use]
    pub fn delayed(self, delay: Duration) -> Self {
        Self::Delay(delay, Box::new(self))
    }
}

/// The head of a request seen by a [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// Request method.
    pub method: Method,

    /// Request URI.
    pub uri: Uri,

    /// Request headers.
    pub headers: HeaderMap,
}

#[derive(Default)]
struct State {
    fallback: Mutex<Option<MockReply>>,
    outstanding_bodies: Arc<AtomicUsize>,
    queued: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-memory [`Transport`] answering with scripted replies.
///
/// Queued replies are used first, in order. Once the queue is empty every
/// request gets the fallback reply. Clones share the same script and records,
/// so a test can keep a handle after moving one into a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<State>,
}

impl MockTransport {
    /// Creates a transport with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that gives `reply` to every request.
    #[must_use]
    pub fn replying(reply: MockReply) -> Self {
        let transport = Self::new();
        *transport.state.fallback.lock() = Some(reply);

        transport
    }

    /// Queues a reply for the next unanswered request.
    pub fn push_reply(&self, reply: MockReply) {
        self.state.queued.lock().push_back(reply);
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.requests.lock().len()
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of response bodies handed out and not yet dropped.
    #[must_use]
    pub fn outstanding_bodies(&self) -> usize {
        self.state.outstanding_bodies.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Option<MockReply> {
        self.state
            .queued
            .lock()
            .pop_front()
            .or_else(|| self.state.fallback.lock().clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    type Body = MockBody;
    type Error = Error;

    async fn send(&self, request: Request<()>) -> Result<Response<Self::Body>, Self::Error> {
        let (parts, ()) = request.into_parts();
        debug!("mock transport received {} {}", parts.method, parts.uri);

        let host = parts.uri.host().unwrap_or_default().to_string();
        self.state.requests.lock().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
        });

        let mut reply = self
            .next_reply()
            .ok_or_else(|| Error::Unscripted(host.clone()))?;

        let (status, body) = loop {
            match reply {
                MockReply::Delay(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
                MockReply::Respond { status, body } => break (status, Some(body)),
                MockReply::BrokenBody { status } => break (status, None),
                MockReply::Refuse => return Err(Error::ConnectionRefused(host)),
            }
        };

        let mut response = Response::new(MockBody::new(
            body,
            Arc::clone(&self.state.outstanding_bodies),
        ));
        *response.status_mut() = status;

        Ok(response)
    }
}

/// Response body handed out by a [`MockTransport`].
///
/// Counts as outstanding on its transport until dropped.
#[derive(Debug)]
pub struct MockBody {
    data: Option<Bytes>,
    broken: bool,
    outstanding: Arc<AtomicUsize>,
}

impl MockBody {
    fn new(data: Option<Bytes>, outstanding: Arc<AtomicUsize>) -> Self {
        outstanding.fetch_add(1, Ordering::SeqCst);

        Self {
            broken: data.is_none(),
            data,
            outstanding,
        }
    }
}

impl Body for MockBody {
    type Data = Bytes;
    type Error = Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();

        if this.broken {
            this.broken = false;
            return Poll::Ready(Some(Err(Error::BrokenBody(
                "connection reset mid-body".to_string(),
            ))));
        }

        Poll::Ready(this.data.take().map(|data| Ok(Frame::data(data))))
    }

    fn is_end_stream(&self) -> bool {
        !self.broken && self.data.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        match &self.data {
            Some(data) if !self.broken => SizeHint::with_exact(data.len() as u64),
            _ => SizeHint::default(),
        }
    }
}

impl Drop for MockBody {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }
}
