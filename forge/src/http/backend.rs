//! Backend abstraction used by the submission pipeline

use async_trait::async_trait;
use http::StatusCode;

use crate::errors::TransportError;
use crate::models::deploy::{DeployRequest, DeployResult, StatusResult};

/// An HTTP response reduced to its status code and decoded JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply<T> {
    pub status: StatusCode,

    /// `None` when the body was empty or not the expected JSON
    pub body: Option<T>,
}

impl<T> HttpReply<T> {
    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, Some(body))
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The two endpoints a deployment talks to
#[async_trait]
pub trait DeployBackend: Send + Sync {
    /// `GET /status`
    async fn status(&self) -> Result<HttpReply<StatusResult>, TransportError>;

    /// `POST /deploy` with the request as multipart form data
    async fn deploy(
        &self,
        request: &DeployRequest,
    ) -> Result<HttpReply<DeployResult>, TransportError>;
}
