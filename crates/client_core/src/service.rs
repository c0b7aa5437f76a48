use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::OrderId,
    error::{ApiException, ErrorBody, ErrorCode},
    protocol::{CreateCakeRequest, CreateCakeResponse, CREATE_CAKE_PATH},
};
use tracing::{debug, warn};
use url::Url;

/// Remote collaborator that persists finished orders.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, request: CreateCakeRequest) -> Result<OrderId, ApiException>;
}

/// Where the order service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    base_url: String,
    /// `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Result<Self, ApiException> {
        let parsed = Url::parse(base_url.trim()).map_err(|e| {
            ApiException::new(
                ErrorCode::Validation,
                format!("invalid order service url '{base_url}': {e}"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiException::new(
                ErrorCode::Validation,
                format!("order service url must be http or https, got '{base_url}'"),
            ));
        }
        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            request_timeout: None,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn create_order_url(&self) -> String {
        format!("{}{CREATE_CAKE_PATH}", self.base_url)
    }
}

pub struct HttpOrderService {
    http: Client,
    config: ServiceConfig,
}

impl HttpOrderService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

fn transport_error(err: reqwest::Error) -> ApiException {
    ApiException::new(ErrorCode::Transport, err.to_string())
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn create_order(&self, request: CreateCakeRequest) -> Result<OrderId, ApiException> {
        let url = self.config.create_order_url();
        let mut builder = self.http.post(&url).json(&request);
        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(%url, %status, body_len = body.len(), "order service responded");

        if !status.is_success() {
            let err = ApiException::from(ErrorBody::from_slice(&body));
            warn!(%status, message = %err.message, "order service rejected order");
            return Err(err);
        }

        let created: CreateCakeResponse = serde_json::from_slice(&body).map_err(|e| {
            ApiException::new(
                ErrorCode::MalformedResponse,
                format!("invalid create-order response: {e}"),
            )
        })?;
        Ok(created.id)
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
