use std::error::Error as StdError;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body::Body;

use crate::error::BoxError;

/// Sends HTTP requests on behalf of a [`KubeletClient`](crate::KubeletClient).
///
/// Implementations own everything about how a request reaches the kubelet:
/// TLS material, authentication headers, proxies, timeouts and connection
/// reuse. They must be safe to share between tasks.
#[async_trait]
pub trait Transport
where
    Self: Send + Sync + 'static,
{
    /// The response body type.
    type Body: Body<Data = Bytes, Error: Into<BoxError>> + Send + 'static;

    /// The error returned when no response could be obtained.
    type Error: StdError + Send + Sync + 'static;

    /// Sends `request` and returns the response head with an unread body.
    async fn send(&self, request: Request<()>) -> Result<Response<Self::Body>, Self::Error>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps a caller-configured client.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Body = reqwest::Body;
    type Error = reqwest::Error;

    async fn send(&self, request: Request<()>) -> Result<Response<Self::Body>, Self::Error> {
        let (parts, ()) = request.into_parts();

        let request = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .build()?;

        let response = self.client.execute(request).await?;

        Ok(Response::from(response))
    }
}
