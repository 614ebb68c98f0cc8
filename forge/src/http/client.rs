//! HTTP client implementation

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::errors::{HostforgeError, TransportError};
use crate::http::backend::{DeployBackend, HttpReply};
use crate::models::deploy::{DeployRequest, DeployResult, Field, StatusResult};
use crate::storage::settings::BackendSettings;

const ZIP_MIME: &str = "application/zip";

/// HTTP client for backend communication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    status_path: String,
    deploy_path: String,
}

impl HttpClient {
    /// Create a new HTTP client with the default endpoint paths
    pub fn new(base_url: &str) -> Result<Self, HostforgeError> {
        Self::from_settings(&BackendSettings {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Create a new HTTP client from backend settings
    ///
    /// No request timeout is set: a deploy runs for as long as the backend
    /// needs, and only cancellation ends it early.
    pub fn from_settings(settings: &BackendSettings) -> Result<Self, HostforgeError> {
        let parsed = Url::parse(&settings.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(HostforgeError::ConfigError(format!(
                "Backend URL must use http or https: {}",
                settings.base_url
            )));
        }

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            status_path: settings.status_path.clone(),
            deploy_path: settings.deploy_path.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn multipart(&self, request: &DeployRequest) -> Result<Form, TransportError> {
        let zip = request.zip_file();
        let bytes = zip.bytes().await.map_err(|e| {
            TransportError::Other(format!("Unable to read {}: {}", zip.file_name(), e))
        })?;
        let length = bytes.len() as u64;
        let part = Part::stream_with_length(bytes, length)
            .file_name(zip.file_name().to_string())
            .mime_str(ZIP_MIME)?;

        let form = request
            .text_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value.to_string()))
            .part(Field::ZipFile.name(), part);
        Ok(form)
    }
}

/// Decode a JSON reply. A success status needs a parseable body; an error
/// status keeps whatever could be decoded.
async fn read_reply<T: DeserializeOwned>(
    response: Response,
) -> Result<HttpReply<T>, TransportError> {
    let status = response.status();
    let text = response.text().await?;

    match serde_json::from_str::<T>(&text) {
        Ok(body) => Ok(HttpReply::new(status, Some(body))),
        Err(e) if status.is_success() => {
            error!("Unexpected response body ({}): {}", status, text);
            Err(TransportError::Other(format!("Invalid response from backend: {}", e)))
        }
        Err(_) => {
            warn!("HTTP {} with non-JSON body: {}", status, text);
            Ok(HttpReply::new(status, None))
        }
    }
}

#[async_trait]
impl DeployBackend for HttpClient {
    async fn status(&self) -> Result<HttpReply<StatusResult>, TransportError> {
        let url = self.url(&self.status_path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        read_reply(response).await
    }

    async fn deploy(
        &self,
        request: &DeployRequest,
    ) -> Result<HttpReply<DeployResult>, TransportError> {
        let url = self.url(&self.deploy_path);
        debug!(
            "POST {} ({}, {} bytes)",
            url,
            request.zip_file().file_name(),
            request.zip_file().size()
        );

        let form = self.multipart(request).await?;
        let response = self.client.post(&url).multipart(form).send().await?;
        read_reply(response).await
    }
}
