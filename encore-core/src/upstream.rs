use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::Raw;

/// Failure of a single origin fetch.
///
/// Everything here is a transport-level failure from the catalog's point of
/// view: the origin could not be asked, or it answered with something other
/// than success.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// DNS, connect, TLS or body-read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The origin answered with a non-2xx status.
    #[error("{url} responded with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The fetch did not complete within the per-call timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout {
        /// Requested URL.
        url: String,
        /// The timeout that expired.
        timeout: Duration,
    },
}

/// Origin access: a single GET against a URL, returning the raw body.
///
/// Implementations perform exactly one attempt. Timeouts are applied by the
/// caller, which drops the returned future on expiry, so implementations must
/// be cancel-safe.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use encore_core::{Raw, Upstream, UpstreamError};
///
/// struct Fixed(&'static [u8]);
///
/// #[async_trait]
/// impl Upstream for Fixed {
///     async fn fetch(&self, _url: &str) -> Result<Raw, UpstreamError> {
///         Ok(Raw::from_static(self.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch `url` and return its body on a 2xx response.
    async fn fetch(&self, url: &str) -> Result<Raw, UpstreamError>;
}

#[async_trait]
impl<U> Upstream for Arc<U>
where
    U: Upstream + ?Sized,
{
    async fn fetch(&self, url: &str) -> Result<Raw, UpstreamError> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<U> Upstream for Box<U>
where
    U: Upstream + ?Sized,
{
    async fn fetch(&self, url: &str) -> Result<Raw, UpstreamError> {
        (**self).fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Upstream for Echo {
        async fn fetch(&self, url: &str) -> Result<Raw, UpstreamError> {
            Ok(Raw::copy_from_slice(url.as_bytes()))
        }
    }

    #[tokio::test]
    async fn shared_upstream_delegates() {
        let upstream: Arc<dyn Upstream> = Arc::new(Echo);
        let body = upstream.fetch("https://x/artists").await.unwrap();
        assert_eq!(&body[..], b"https://x/artists");
    }

    #[test]
    fn status_error_names_url_and_code() {
        let error = UpstreamError::Status {
            url: "https://x/artists".into(),
            status: 503,
        };
        assert_eq!(error.to_string(), "https://x/artists responded with status 503");
    }
}
