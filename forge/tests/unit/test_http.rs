//! HttpClient against a local axum backend

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use hostforge::deploy::pipeline::{check_health, deploy};
use hostforge::errors::{SubmitError, TransportError, CONNECT_FAILURE_MESSAGE};
use hostforge::form::validate::validated_request;
use hostforge::http::backend::DeployBackend;
use hostforge::http::client::HttpClient;
use hostforge::models::deploy::{DeployForm, DeployRequest, DeployedSite};

use crate::support::site_zip;

/// One multipart part as the backend saw it
#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

enum Body {
    Json(Value),
    Text(&'static str),
}

struct Script {
    status: (StatusCode, Body),
    deploy: (StatusCode, Body),
    received: Mutex<Vec<ReceivedPart>>,
}

impl Script {
    fn new(status: (StatusCode, Body), deploy: (StatusCode, Body)) -> Arc<Self> {
        Arc::new(Self {
            status,
            deploy,
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<ReceivedPart> {
        self.received.lock().unwrap().clone()
    }
}

fn respond(reply: &(StatusCode, Body)) -> Response {
    match &reply.1 {
        Body::Json(value) => (reply.0, Json(value.clone())).into_response(),
        Body::Text(text) => (reply.0, *text).into_response(),
    }
}

async fn status_handler(State(script): State<Arc<Script>>) -> Response {
    respond(&script.status)
}

async fn deploy_handler(State(script): State<Arc<Script>>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        script.received.lock().unwrap().push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    respond(&script.deploy)
}

/// Serve `script` on an ephemeral port and return its base URL
async fn serve(script: Arc<Script>) -> String {
    let app = Router::new()
        .route("/status", get(status_handler))
        .route("/deploy", post(deploy_handler))
        .with_state(script);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn healthy_body() -> (StatusCode, Body) {
    (
        StatusCode::OK,
        Body::Json(json!({"status": "healthy", "dependencies": "all_installed"})),
    )
}

fn request() -> DeployRequest {
    let form = DeployForm {
        location: "westeurope".to_string(),
        environment: " prod ".to_string(),
        owner: "team_web".to_string(),
        storage_account_name: "abc123".to_string(),
        zip_file: Some(site_zip()),
    };
    validated_request(&form).unwrap()
}

#[tokio::test]
async fn test_deploy_sends_multipart_form() {
    let script = Script::new(
        healthy_body(),
        (
            StatusCode::OK,
            Body::Json(json!({
                "success": true,
                "url": "https://abc123.z6.web.core.windows.net",
                "resource_group_name": "rg-prod",
                "storage_account_name": "abc123"
            })),
        ),
    );
    let client = HttpClient::new(&serve(script.clone()).await).unwrap();

    let healthy = check_health(&client).await.unwrap();
    assert!(healthy.status().is_healthy());

    let site = deploy(&client, &healthy, &request()).await.unwrap();
    assert_eq!(
        site,
        DeployedSite {
            url: "https://abc123.z6.web.core.windows.net".to_string(),
            resource_group_name: "rg-prod".to_string(),
            storage_account_name: "abc123".to_string(),
        }
    );

    let parts = script.received();
    let text: Vec<(String, String)> = parts
        .iter()
        .filter(|p| p.file_name.is_none())
        .map(|p| (p.name.clone(), String::from_utf8(p.data.clone()).unwrap()))
        .collect();
    assert_eq!(
        text,
        vec![
            ("location".to_string(), "westeurope".to_string()),
            ("environment".to_string(), "prod".to_string()),
            ("owner".to_string(), "team_web".to_string()),
            ("storage_account_name".to_string(), "abc123".to_string()),
        ]
    );

    let zip = parts.iter().find(|p| p.name == "zip_file").unwrap();
    assert_eq!(zip.file_name.as_deref(), Some("site.zip"));
    assert_eq!(zip.content_type.as_deref(), Some("application/zip"));
    assert_eq!(zip.data, b"PK\x05\x06 fake archive".to_vec());
}

#[tokio::test]
async fn test_unhealthy_backend_reports_reason() {
    let script = Script::new(
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Body::Json(json!({"status": "unhealthy", "error": "Terraform missing"})),
        ),
        (StatusCode::OK, Body::Json(json!({}))),
    );
    let client = HttpClient::new(&serve(script).await).unwrap();

    let err = check_health(&client).await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::BackendUnavailable("Backend issue: Terraform missing".to_string())
    );
}

#[tokio::test]
async fn test_deploy_error_status_includes_backend_error() {
    let script = Script::new(
        healthy_body(),
        (
            StatusCode::BAD_REQUEST,
            Body::Json(json!({"error": "Missing one or more required fields"})),
        ),
    );
    let client = HttpClient::new(&serve(script).await).unwrap();

    let healthy = check_health(&client).await.unwrap();
    let err = deploy(&client, &healthy, &request()).await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::DeploymentFailed(
            "HTTP error! status: 400: Missing one or more required fields".to_string()
        )
    );
}

#[tokio::test]
async fn test_deploy_error_status_without_json() {
    let script = Script::new(healthy_body(), (StatusCode::BAD_GATEWAY, Body::Text("Bad Gateway")));
    let client = HttpClient::new(&serve(script).await).unwrap();

    let healthy = check_health(&client).await.unwrap();
    let err = deploy(&client, &healthy, &request()).await.unwrap_err();
    assert_eq!(err, SubmitError::DeploymentFailed("HTTP error! status: 502".to_string()));
}

#[tokio::test]
async fn test_success_with_invalid_body_is_transport_error() {
    let script = Script::new((StatusCode::OK, Body::Text("<html>proxy</html>")), healthy_body());
    let client = HttpClient::new(&serve(script).await).unwrap();

    let err = client.status().await.unwrap_err();
    assert!(matches!(
        err,
        TransportError::Other(ref m) if m.starts_with("Invalid response from backend")
    ));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Reserve a port, then free it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(&format!("http://{}", addr)).unwrap();

    let transport = client.status().await.unwrap_err();
    assert!(transport.is_connect());
    assert_eq!(transport.to_string(), CONNECT_FAILURE_MESSAGE);

    let err = check_health(&client).await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::BackendUnavailable(CONNECT_FAILURE_MESSAGE.to_string())
    );
}

#[test]
fn test_rejects_non_http_base_url() {
    assert!(HttpClient::new("ftp://localhost:5000").is_err());
    assert!(HttpClient::new("not a url").is_err());
}
