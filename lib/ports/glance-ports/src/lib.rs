//! Port traits the dashboard core depends on.

mod endpoint;
mod error;
pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use endpoint::{ApiHost, EndpointSpec};
pub use error::HttpError;
pub use memory::InMemoryApiPort;

/// Issues one request and returns the decoded JSON body.
///
/// Implementations apply their own deadline; an expired deadline is reported
/// as [`HttpError::Timeout`]. Callers never retry.
#[async_trait]
pub trait ApiPort: Send + Sync {
    async fn request(&self, endpoint: EndpointSpec) -> Result<serde_json::Value, HttpError>;
}

/// Requests `endpoint` and decodes the body into `T`.
pub async fn fetch<T: DeserializeOwned>(
    api: &dyn ApiPort,
    endpoint: EndpointSpec,
) -> Result<T, HttpError> {
    let url = endpoint.to_string();
    let body = api.request(endpoint).await?;
    serde_json::from_value(body).map_err(|err| HttpError::Decode {
        url,
        message: err.to_string(),
    })
}
