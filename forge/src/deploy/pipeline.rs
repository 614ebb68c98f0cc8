//! Two-step deploy pipeline: health check, then deploy

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::errors::{SubmitError, TransportError, CONNECT_FAILURE_MESSAGE};
use crate::http::backend::DeployBackend;
use crate::models::deploy::{DeployRequest, DeployedSite, StatusResult};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Proof that the backend passed its health check
///
/// Only [`check_health`] creates one, and [`deploy`] requires it.
#[derive(Debug, Clone)]
pub struct HealthyBackend {
    status: StatusResult,
}

impl HealthyBackend {
    pub fn status(&self) -> &StatusResult {
        &self.status
    }
}

/// Run `fut` unless `cancel` fires first; a late result is dropped with the future
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, SubmitError>
where
    F: Future<Output = Result<T, SubmitError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Submission step cancelled");
            Err(SubmitError::Cancelled)
        }
        result = fut => result,
    }
}

/// Step one: `GET /status` must answer 2xx with `status: "healthy"`
pub async fn check_health(backend: &dyn DeployBackend) -> Result<HealthyBackend, SubmitError> {
    let reply = backend.status().await.map_err(|e| {
        warn!("Health check failed to reach backend: {}", e);
        match e {
            TransportError::Connect(_) => {
                SubmitError::BackendUnavailable(CONNECT_FAILURE_MESSAGE.to_string())
            }
            TransportError::Other(message) => {
                SubmitError::BackendUnavailable(format!("Backend issue: {}", message))
            }
        }
    })?;

    match reply.body {
        Some(status) if reply.status.is_success() && status.is_healthy() => {
            Ok(HealthyBackend { status })
        }
        body => {
            let reason = body
                .and_then(|status| status.error)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            warn!("Backend unhealthy ({}): {}", reply.status, reason);
            Err(SubmitError::BackendUnavailable(format!("Backend issue: {}", reason)))
        }
    }
}

/// Step two: `POST /deploy` the validated request
pub async fn deploy(
    backend: &dyn DeployBackend,
    _healthy: &HealthyBackend,
    request: &DeployRequest,
) -> Result<DeployedSite, SubmitError> {
    let reply = backend.deploy(request).await.map_err(SubmitError::Network)?;

    if !reply.is_success() {
        let mut message = format!("HTTP error! status: {}", reply.status.as_u16());
        if let Some(error) = reply.body.and_then(|body| body.error) {
            message.push_str(": ");
            message.push_str(&error);
        }
        return Err(SubmitError::DeploymentFailed(message));
    }

    let Some(result) = reply.body else {
        return Err(SubmitError::DeploymentFailed("Empty response from backend".to_string()));
    };

    if !result.success {
        return Err(SubmitError::DeploymentFailed(
            result.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        ));
    }

    let url = result.url.ok_or_else(|| {
        SubmitError::DeploymentFailed("Backend reported success without a site URL".to_string())
    })?;

    Ok(DeployedSite {
        url,
        resource_group_name: result.resource_group_name.unwrap_or_default(),
        storage_account_name: result
            .storage_account_name
            .unwrap_or_else(|| request.storage_account_name().to_string()),
    })
}
