use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use encore_core::{Raw, Upstream, UpstreamError};

use crate::fixtures::ABSENT_BODY;

#[derive(Debug, Clone)]
enum Reply {
    Body(Raw),
    Status(u16),
    Transport(String),
}

#[derive(Debug, Clone)]
struct Route {
    reply: Reply,
    delay: Option<Duration>,
}

/// Scripted [`Upstream`] keyed by URL, recording every call in order.
///
/// Unscripted URLs answer with status 404. Clones share routes and the call
/// log.
#[derive(Clone, Debug, Default)]
pub struct MockUpstream {
    routes: Arc<DashMap<String, Route>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&self, url: &str, reply: Reply) -> &Self {
        let delay = self.routes.get(url).and_then(|route| route.delay);
        self.routes
            .insert(url.to_owned(), Route { reply, delay });
        self
    }

    /// Answer `url` with `value` serialized as JSON.
    pub fn json<T: serde::Serialize>(&self, url: &str, value: &T) -> &Self {
        let raw = serde_json::to_vec(value).expect("fixture serializes");
        self.route(url, Reply::Body(Raw::from(raw)))
    }

    /// Answer `url` with exactly `body`.
    pub fn raw(&self, url: &str, body: impl Into<Raw>) -> &Self {
        self.route(url, Reply::Body(body.into()))
    }

    /// Answer `url` with the origin's 126-byte placeholder.
    pub fn absent(&self, url: &str) -> &Self {
        self.raw(url, Raw::from_static(ABSENT_BODY))
    }

    /// Answer `url` with an error status.
    pub fn status(&self, url: &str, status: u16) -> &Self {
        self.route(url, Reply::Status(status))
    }

    /// Fail `url` as if the connection broke.
    pub fn transport_error(&self, url: &str, message: &str) -> &Self {
        self.route(url, Reply::Transport(message.to_owned()))
    }

    /// Delay every answer for `url`. Set the reply first.
    pub fn delay(&self, url: &str, delay: Duration) -> &Self {
        if let Some(mut route) = self.routes.get_mut(url) {
            route.delay = Some(delay);
        }
        self
    }

    /// Every requested URL, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    /// How many times `url` was requested.
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .expect("call log poisoned")
            .iter()
            .filter(|called| called.as_str() == url)
            .count()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().expect("call log poisoned").clear();
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn fetch(&self, url: &str) -> Result<Raw, UpstreamError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(url.to_owned());

        let route = self.routes.get(url).map(|route| route.value().clone());
        let Some(route) = route else {
            return Err(UpstreamError::Status {
                url: url.to_owned(),
                status: 404,
            });
        };
        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }
        match route.reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(UpstreamError::Status {
                url: url.to_owned(),
                status,
            }),
            Reply::Transport(message) => Err(UpstreamError::Transport {
                url: url.to_owned(),
                source: message.into(),
            }),
        }
    }
}
