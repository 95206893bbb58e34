use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::result::FailureKind;
use super::{USER_AGENT, report};

/// Failure reported by a [`Transport`], already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: FailureKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// The network side of a probe.
///
/// Implementations resolve once the response headers for a GET to `url`
/// have arrived and must not read the body. Timing and the timeout bound
/// are applied by the caller, see [`super::probe::probe_url`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_headers(&self, url: &str) -> Result<(), TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the client used for every probe of a run.
    ///
    /// `timeout` is applied as both the connect and the request timeout so
    /// the client gives up at the same point the probe deadline does.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_headers(&self, url: &str) -> Result<(), TransportError> {
        let parsed = Url::parse(url).map_err(|err| {
            TransportError::new(
                FailureKind::RequestBuildError,
                format!("invalid URL '{url}': {err}"),
            )
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|err| classify(&err))?;

        tracing::trace!(url, status = %response.status(), "response headers received");
        // Headers are all we time; the body is released unread.
        drop(response);
        Ok(())
    }
}

fn classify(err: &reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_builder() {
        FailureKind::RequestBuildError
    } else {
        FailureKind::NetworkError
    };
    TransportError::new(kind, report(err))
}
