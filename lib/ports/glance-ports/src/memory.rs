//! Canned-response [`ApiPort`] for tests and offline runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ApiPort, EndpointSpec, HttpError};

/// Serves canned JSON by request path and records every request it receives.
/// Paths without a canned response answer with HTTP 404.
#[derive(Clone, Default)]
pub struct InMemoryApiPort {
    responses: HashMap<String, Result<serde_json::Value, HttpError>>,
    delays: HashMap<String, Duration>,
    requests: Arc<Mutex<Vec<EndpointSpec>>>,
}

impl InMemoryApiPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses.insert(path.into(), Ok(body));
        self
    }

    pub fn fail(mut self, path: impl Into<String>, status: u16) -> Self {
        let path = path.into();
        let err = HttpError::Status {
            status,
            url: path.clone(),
        };
        self.responses.insert(path, Err(err));
        self
    }

    pub fn fail_with(mut self, path: impl Into<String>, err: HttpError) -> Self {
        self.responses.insert(path.into(), Err(err));
        self
    }

    /// Holds the response for `path` back by `delay` (tokio time).
    pub fn delay(mut self, path: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }

    pub fn requests(&self) -> Vec<EndpointSpec> {
        if let Ok(guard) = self.requests.lock() {
            guard.clone()
        } else {
            Vec::new()
        }
    }

    pub fn count_requests(&self, predicate: impl Fn(&EndpointSpec) -> bool) -> usize {
        self.requests().iter().filter(|spec| predicate(spec)).count()
    }

    pub fn requested(&self, path: &str) -> bool {
        self.count_requests(|spec| spec.path == path) > 0
    }
}

#[async_trait]
impl ApiPort for InMemoryApiPort {
    async fn request(&self, endpoint: EndpointSpec) -> Result<serde_json::Value, HttpError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(endpoint.clone());
        }
        if let Some(delay) = self.delays.get(&endpoint.path) {
            tokio::time::sleep(*delay).await;
        }
        match self.responses.get(&endpoint.path) {
            Some(response) => response.clone(),
            None => Err(HttpError::Status {
                status: 404,
                url: endpoint.to_string(),
            }),
        }
    }
}
