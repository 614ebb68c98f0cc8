//! Error types for the HostForge client

use thiserror::Error;

/// Message shown whenever the backend cannot be reached at all
pub const CONNECT_FAILURE_MESSAGE: &str =
    "Cannot connect to the backend. Please ensure the backend server is running.";

/// Message fragments that identify a connection-level failure
const CONNECT_SIGNATURES: &[&str] = &[
    "connection refused",
    "error trying to connect",
    "failed to fetch",
    "dns error",
];

/// Crate-level error type
#[derive(Error, Debug)]
pub enum HostforgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Transport-level failure talking to the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The backend could not be reached
    #[error("{}", CONNECT_FAILURE_MESSAGE)]
    Connect(String),

    /// Any other failure (body decoding, broken stream, ...)
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Classify a transport failure from its message text
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if is_connect_signature(&message) {
            TransportError::Connect(message)
        } else {
            TransportError::Other(message)
        }
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest hides the root cause behind its Display; walk the chain too
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if err.is_connect() {
            TransportError::Connect(message)
        } else {
            TransportError::from_message(message)
        }
    }
}

fn is_connect_signature(message: &str) -> bool {
    let lower = message.to_lowercase();
    CONNECT_SIGNATURES.iter().any(|sig| lower.contains(sig))
}

/// Why a submission attempt ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// A field failed local validation; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The health check was unreachable or reported an unhealthy backend
    #[error("{0}")]
    BackendUnavailable(String),

    /// The deploy call came back with `success: false` or a non-2xx status
    #[error("{0}")]
    DeploymentFailed(String),

    /// The deploy call failed at the transport level
    #[error("{0}")]
    Network(TransportError),

    /// The user aborted the submission
    #[error("Deployment cancelled")]
    Cancelled,

    /// Another submission is still in flight
    #[error("A deployment is already in progress")]
    Busy,
}

impl SubmitError {
    /// Short heading used in front of the message in the status area
    pub fn heading(&self) -> &'static str {
        match self {
            SubmitError::Validation(_) => "Invalid input",
            SubmitError::BackendUnavailable(_) => "Backend unavailable",
            SubmitError::DeploymentFailed(_) => "Deployment Failed",
            SubmitError::Network(TransportError::Connect(_)) => "Connection Error",
            SubmitError::Network(TransportError::Other(_)) => "Error",
            SubmitError::Cancelled => "Cancelled",
            SubmitError::Busy => "Busy",
        }
    }
}
