use std::borrow::Cow;
use std::net::Ipv6Addr;
use std::sync::Arc;

use async_trait::async_trait;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};
use url::{Position, Url};

use crate::SummaryProvider;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::Summary;

/// Port of the authenticated kubelet API.
pub const DEFAULT_KUBELET_PORT: u16 = 10250;

/// Port of the legacy read-only kubelet API.
pub const DEFAULT_READ_ONLY_PORT: u16 = 10255;

const SUMMARY_PATH: &str = "/stats/summary/";

/// URL scheme used to reach the kubelet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// Returns the scheme as a string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Options for configuring a `KubeletClient`.
pub struct KubeletClientOptions<T> {
    /// Use plain HTTP instead of HTTPS.
    pub insecure: bool,

    /// The kubelet port.
    pub port: u16,

    /// The transport used to send requests.
    pub transport: T,
}

/// Fetches summary metrics from kubelets over HTTP(S).
pub struct KubeletClient<T> {
    port: u16,
    scheme: Scheme,
    transport: Arc<T>,
}

impl<T> Clone for KubeletClient<T> {
    fn clone(&self) -> Self {
        Self {
            port: self.port,
            scheme: self.scheme,
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> KubeletClient<T>
where
    T: Transport,
{
    /// Creates a new client. No requests are made until a summary is fetched.
    #[must_use]
    pub fn new(
        KubeletClientOptions {
            insecure,
            port,
            transport,
        }: KubeletClientOptions<T>,
    ) -> Self {
        let scheme = if insecure { Scheme::Http } else { Scheme::Https };

        Self {
            port,
            scheme,
            transport: Arc::new(transport),
        }
    }

    /// The kubelet port requests are sent to.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The scheme requests are sent with.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the summary endpoint for `host`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if `host` is empty, is not a valid
    /// IP address or DNS name, or carries its own port.
    pub fn endpoint(&self, host: &str) -> Result<Url> {
        summary_url(self.scheme, host, self.port)
    }

    /// Fetches summary metrics from the kubelet on `host`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No endpoint can be built for `host`
    /// - The transport fails to send the request or receive a response
    /// - The kubelet answers 404 (see [`Error::is_not_found`])
    /// - The kubelet answers with any other status than 200
    /// - The response body cannot be read or parsed into a [`Summary`]
    #[instrument(skip(self))]
    pub async fn get_summary(&self, host: &str) -> Result<Summary> {
        let url = self.endpoint(host)?;

        self.fetch(&url).await
    }

    /// Like [`get_summary`](Self::get_summary), but gives up as soon as
    /// `cancellation_token` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the token fires before the response is
    /// decoded, otherwise the same errors as `get_summary`.
    #[instrument(skip(self, cancellation_token))]
    pub async fn get_summary_with_cancellation(
        &self,
        host: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<Summary> {
        let url = self.endpoint(host)?;

        tokio::select! {
            biased;
            () = cancellation_token.cancelled() => Err(Error::Cancelled {
                endpoint: url.to_string(),
            }),
            result = self.fetch(&url) => result,
        }
    }

    async fn fetch(&self, url: &Url) -> Result<Summary> {
        let endpoint = url.to_string();
        debug!("fetching summary from {endpoint}");

        let request = Request::get(url.as_str())
            .body(())
            .map_err(|e| Error::Transport {
                endpoint: endpoint.clone(),
                source: Box::new(e),
            })?;

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::Transport {
                endpoint: endpoint.clone(),
                source: Box::new(e),
            })?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::Body {
                endpoint: endpoint.clone(),
                source: e.into(),
            })?
            .to_bytes();

        match parts.status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(Error::NotFound { endpoint }),
            status => {
                return Err(Error::Status {
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }
        }

        let kubelet_addr = &url[Position::BeforeHost..Position::AfterPort];
        trace!(
            "raw response from kubelet at {kubelet_addr}: {}",
            String::from_utf8_lossy(&body)
        );

        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        })
    }
}

#[async_trait]
impl<T> SummaryProvider for KubeletClient<T>
where
    T: Transport,
{
    async fn get_summary(&self, host: &str) -> Result<Summary> {
        Self::get_summary(self, host).await
    }
}

fn summary_url(scheme: Scheme, host: &str, port: u16) -> Result<Url> {
    let invalid = |source| Error::InvalidEndpoint {
        host: host.to_string(),
        source,
    };

    // Bare IPv6 literals need brackets to be used as a URL host.
    let host_part: Cow<'_, str> = if host.parse::<Ipv6Addr>().is_ok() {
        Cow::Owned(format!("[{host}]"))
    } else {
        Cow::Borrowed(host)
    };

    // The port is configured on the client. `set_host` would silently drop one
    // given here.
    let bracketed = host_part.starts_with('[') && host_part.ends_with(']');
    if !bracketed && host_part.contains(':') {
        return Err(invalid(url::ParseError::InvalidDomainCharacter));
    }

    let mut url = Url::parse(&format!("{}://localhost{SUMMARY_PATH}", scheme.as_str()))
        .map_err(invalid)?;
    url.set_host(Some(&host_part)).map_err(invalid)?;
    url.set_port(Some(port))
        .map_err(|()| invalid(url::ParseError::InvalidPort))?;

    Ok(url)
}
