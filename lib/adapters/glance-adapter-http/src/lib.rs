//! reqwest-backed implementation of [`ApiPort`].

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use glance_domain::ApiConfig;
use glance_ports::{ApiHost, ApiPort, EndpointSpec, HttpError};

#[derive(Debug, Clone)]
pub struct HttpApiAdapter {
    client: Client,
    platform_url: String,
    favorites_url: String,
    metrics_url: String,
    notifications_url: String,
    token: Option<String>,
}

impl HttpApiAdapter {
    /// `token` is sent as a bearer token on every request when present.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&config.accept).context("invalid api.accept header")?,
        );
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("glance/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            platform_url: trim_base(&config.platform_url),
            favorites_url: trim_base(&config.favorites_url),
            metrics_url: trim_base(&config.metrics_url),
            notifications_url: trim_base(&config.notifications_url),
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn url_for(&self, endpoint: &EndpointSpec) -> String {
        let base = match endpoint.host {
            ApiHost::Platform => &self.platform_url,
            ApiHost::Favorites => &self.favorites_url,
            ApiHost::Metrics => &self.metrics_url,
            ApiHost::Notifications => &self.notifications_url,
        };
        format!("{base}{}", endpoint.path)
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn request_error(url: &str, err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_decode() {
        HttpError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else {
        HttpError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ApiPort for HttpApiAdapter {
    async fn request(&self, endpoint: EndpointSpec) -> Result<serde_json::Value, HttpError> {
        let url = self.url_for(&endpoint);
        let mut request = self.client.get(&url).query(&endpoint.query);
        for (name, value) in &endpoint.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!(url = %url, "request");
        let response = request.send().await.map_err(|err| request_error(&url, err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url,
            });
        }
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| request_error(&url, err))
    }
}
