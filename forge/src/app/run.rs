//! Command entry points

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::controller::DeploymentFormController;
use crate::app::options::AppOptions;
use crate::errors::HostforgeError;
use crate::filesys::file::File;
use crate::form::location::LocationSelector;
use crate::http::backend::DeployBackend;
use crate::http::client::HttpClient;
use crate::models::attachment::ZipAttachment;
use crate::models::deploy::Field;
use crate::ui::presenter::Presenter;
use crate::ui::terminal::TerminalPresenter;

/// Values for a deploy, as typed on the command line
#[derive(Debug, Clone)]
pub struct DeployInput {
    pub location: String,
    pub environment: String,
    pub owner: String,
    pub storage_account_name: String,
    pub zip: PathBuf,
}

/// Fill the form, submit it and report the outcome. Returns whether the site
/// was deployed.
///
/// `shutdown_signal` resolving cancels an in-flight submission.
pub async fn deploy(
    options: &AppOptions,
    input: DeployInput,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<bool, HostforgeError> {
    let backend: Arc<dyn DeployBackend> = Arc::new(HttpClient::from_settings(&options.backend)?);
    let presenter: Arc<dyn Presenter> = Arc::new(TerminalPresenter::new(options.theme.clone()));
    let mut controller =
        DeploymentFormController::new(backend, presenter, options.controller.clone());

    let fields = [
        (Field::Location, input.location),
        (Field::Environment, input.environment),
        (Field::Owner, input.owner),
        (Field::StorageAccountName, input.storage_account_name),
    ];
    for (field, value) in fields {
        controller.on_input(field, value);
        controller.on_blur(field);
    }

    let zip_file = File::new(&input.zip);
    match ZipAttachment::from_file(zip_file).await {
        Ok(attachment) => {
            controller.pick_file(attachment);
        }
        Err(e) => {
            warn!("Unable to read {}: {}", input.zip.display(), e);
            return Err(HostforgeError::ValidationError(format!(
                "Unable to read {}: {}",
                input.zip.display(),
                e
            )));
        }
    }

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    let listener = tokio::spawn(async move {
        shutdown_signal.await;
        info!("Cancelling deployment...");
        cancel_on_signal.cancel();
    });

    let result = controller.submit(&cancel).await;
    listener.abort();

    Ok(result.is_ok())
}

/// Query the backend health endpoint and print what it reports
pub async fn status(options: &AppOptions) -> Result<bool, HostforgeError> {
    let client = HttpClient::from_settings(&options.backend)?;

    match client.status().await {
        Ok(reply) => {
            let healthy = reply.is_success() && reply.body.as_ref().is_some_and(|b| b.is_healthy());
            match &reply.body {
                Some(body) => println!("{}", serde_json::to_string_pretty(body)?),
                None => println!("HTTP {}", reply.status),
            }
            if healthy {
                println!("{}", "Backend is healthy".green());
            } else {
                println!("{}", format!("Backend is not healthy (HTTP {})", reply.status).red());
            }
            Ok(healthy)
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(false)
        }
    }
}

/// Print the selectable regions, marking the default
pub fn locations() {
    let selector = LocationSelector::new();
    for option in selector.options() {
        if *option == selector.selected() {
            println!("{} {} {}", "*".green(), option.bold(), "(default)".dimmed());
        } else {
            println!("  {}", option);
        }
    }
}

/// Wait for Ctrl+C or, on Unix, SIGTERM
pub async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        info!("SIGTERM received");
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("Ctrl+C received");
                    }
                }
                return;
            }
            Err(e) => warn!("Unable to listen for SIGTERM: {}", e),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received"),
        Err(e) => {
            warn!("Unable to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
