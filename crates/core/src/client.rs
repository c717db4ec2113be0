//! Outbound side of the widget: the [`SearchBackend`] seam and its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{SearchRequest, WidgetConfig};

/// Something that can answer a search request with a JSON document.
///
/// The response is returned as raw JSON because any shape is legal; interpreting it
/// is [`render::interpret_response`](crate::render::interpret_response)'s job.
pub trait SearchBackend: Send + Sync + 'static {
    fn search(&self, request: &SearchRequest) -> impl Future<Output = Result<Value>> + Send;
}

/// Posts search requests as JSON to a fixed endpoint.
#[derive(Clone)]
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchClient {
    /// Client with no request timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = endpoint.into();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::InvalidEndpoint(endpoint));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()?, endpoint })
    }

    pub fn from_config(config: &WidgetConfig) -> Result<Self> {
        Self::with_timeout(&config.endpoint, config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Value> {
        debug!(endpoint = self.endpoint.as_str(), query = request.query.as_str(), "POST search");

        let resp = self.client.post(&self.endpoint).json(request).send().await?;

        // Error statuses with a JSON body are rendered like any other body
        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Search endpoint returned an error status");
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
