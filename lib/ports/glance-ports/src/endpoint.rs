use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream services the dashboard talks to. Adapters map each to a base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiHost {
    Platform,
    Favorites,
    Metrics,
    Notifications,
}

impl ApiHost {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiHost::Platform => "platform",
            ApiHost::Favorites => "favorites",
            ApiHost::Metrics => "metrics",
            ApiHost::Notifications => "notifications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    pub host: ApiHost,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl EndpointSpec {
    pub fn new(host: ApiHost, path: impl Into<String>) -> Self {
        Self {
            host,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn query_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for EndpointSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host.as_str(), self.path)
    }
}
