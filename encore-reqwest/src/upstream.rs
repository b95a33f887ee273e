//! Origin fetcher built on a reqwest [`Client`].

use std::time::Duration;

use async_trait::async_trait;
use encore_core::{Raw, Upstream, UpstreamError};
use reqwest::Client;
use tracing::{debug, trace};

/// Fetches catalog resources over HTTP with a shared reqwest [`Client`].
///
/// One GET per call, no retries. A client-level timeout is optional: the
/// catalog bounds every call itself, so it is mostly useful when the fetcher
/// is used on its own.
#[derive(Debug, Clone, Default)]
pub struct ReqwestUpstream {
    client: Client,
    timeout: Option<Duration>,
}

impl ReqwestUpstream {
    /// Wrap an existing client, reusing its connection pool.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Bound every request sent through this fetcher.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> UpstreamError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => UpstreamError::Timeout {
                url: url.to_owned(),
                timeout,
            },
            _ => UpstreamError::Transport {
                url: url.to_owned(),
                source: Box::new(error),
            },
        }
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn fetch(&self, url: &str) -> Result<Raw, UpstreamError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        trace!(url, "send origin request");
        let response = request
            .send()
            .await
            .map_err(|error| self.transport_error(url, error))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "origin responded with error status");
            return Err(UpstreamError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|error| self.transport_error(url, error))
    }
}
