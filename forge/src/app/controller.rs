//! Deployment form controller

use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::options::ControllerOptions;
use crate::deploy::fsm::SubmissionState;
use crate::deploy::orchestrator::Orchestrator;
use crate::errors::SubmitError;
use crate::form::file::{accept_file, DropZone};
use crate::form::location::LocationSelector;
use crate::form::validate::{first_failure, storage_name_hint, validate_field, validated_request};
use crate::http::backend::DeployBackend;
use crate::models::attachment::ZipAttachment;
use crate::models::deploy::{DeployForm, DeployedSite, Field};
use crate::ui::notify::{Notification, Notifier};
use crate::ui::presenter::{Presenter, StatusKind, UiState};

pub const STATUS_CHECKING: &str = "Starting deployment... This may take several minutes.";
pub const STATUS_DEPLOYING: &str = "Starting deployment process...";
pub const NOTIFY_SUCCESS: &str = "Website deployed successfully!";
pub const NOTIFY_FAILURE: &str = "Deployment failed. Please try again.";

/// Owns one deploy form: its fields, inline errors, attachment and submissions
pub struct DeploymentFormController {
    presenter: Arc<dyn Presenter>,
    notifier: Notifier,
    orchestrator: Orchestrator,
    selector: LocationSelector,
    drop_zone: DropZone,
    form: DeployForm,
    field_errors: HashMap<Field, String>,
}

impl DeploymentFormController {
    /// Build the controller and render the initial form
    pub fn new(
        backend: Arc<dyn DeployBackend>,
        presenter: Arc<dyn Presenter>,
        options: ControllerOptions,
    ) -> Self {
        let selector = LocationSelector::new();
        let form = DeployForm {
            location: selector.selected().to_string(),
            ..Default::default()
        };

        presenter.render_locations(selector.options(), selector.selected());
        presenter.set_ui_state(UiState::Idle);

        Self {
            notifier: Notifier::new(Arc::clone(&presenter), options.notification_timeout),
            presenter,
            orchestrator: Orchestrator::new(backend),
            selector,
            drop_zone: DropZone::default(),
            form,
            field_errors: HashMap::new(),
        }
    }

    pub fn form(&self) -> &DeployForm {
        &self.form
    }

    pub fn selector(&self) -> &LocationSelector {
        &self.selector
    }

    pub fn ui_state(&self) -> UiState {
        self.orchestrator.state().into()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.orchestrator.state()
    }

    /// Number of submissions that got past local validation
    pub fn attempts(&self) -> u32 {
        self.orchestrator.attempts()
    }

    pub fn attachment(&self) -> Option<&ZipAttachment> {
        self.form.zip_file.as_ref()
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn is_drop_highlighted(&self) -> bool {
        self.drop_zone.is_highlighted()
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    /// Close a notification before its timer does
    pub fn dismiss_notification(&self, id: u64) -> bool {
        self.notifier.dismiss(id)
    }

    /// A field's value changed: store it and drop any stale inline error
    pub fn on_input(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if field == Field::Location {
            self.selector.select(&value);
        }
        self.form.set_value(field, value);
        self.clear_error(field);
    }

    /// A field lost focus: validate it and show the error inline
    pub fn on_blur(&mut self, field: Field) -> bool {
        let result = validate_field(field, self.form.value(field));
        match result.message {
            Some(message) if !result.valid => {
                self.set_error(field, message);
                false
            }
            _ => true,
        }
    }

    /// Feedback while typing; only the storage account name has any
    pub fn live_hint(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::StorageAccountName => storage_name_hint(&self.form.storage_account_name),
            _ => None,
        }
    }

    /// A file came from the picker. Non-ZIP files leave the current attachment alone.
    pub fn pick_file(&mut self, candidate: ZipAttachment) -> bool {
        match accept_file(candidate) {
            Ok(zip) => {
                info!("Attached {}", zip.label());
                self.presenter.update_file_label(&zip.label());
                self.form.zip_file = Some(zip);
                self.clear_error(Field::ZipFile);
                true
            }
            Err(message) => {
                self.presenter.update_status(&message, StatusKind::Error);
                self.set_error(Field::ZipFile, message);
                false
            }
        }
    }

    pub fn drag_over(&mut self) {
        if self.drop_zone.drag_over() {
            self.presenter.set_drop_highlight(true);
        }
    }

    pub fn drag_leave(&mut self) {
        if self.drop_zone.drag_leave() {
            self.presenter.set_drop_highlight(false);
        }
    }

    /// Files dropped on the drop zone; the first one is treated like a pick
    pub fn drop_files(&mut self, files: Vec<ZipAttachment>) -> bool {
        let was_highlighted = self.drop_zone.is_highlighted();
        let first = self.drop_zone.drop_files(files);
        if was_highlighted {
            self.presenter.set_drop_highlight(false);
        }
        match first {
            Some(file) => self.pick_file(file),
            None => false,
        }
    }

    /// Validate, then run health check and deploy.
    ///
    /// Nothing is sent unless every field is valid. Whatever the outcome, the
    /// form is interactive again when this returns or its future is dropped.
    pub async fn submit(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<DeployedSite, SubmitError> {
        let request = match validated_request(&self.form) {
            Ok(request) => request,
            Err(message) => {
                debug!("Submission blocked by validation: {}", message);
                if let Some((field, field_message)) = first_failure(&self.form) {
                    self.set_error(field, field_message);
                }
                self.presenter.update_status(&message, StatusKind::Error);
                return Err(SubmitError::Validation(message));
            }
        };

        let presenter = Arc::clone(&self.presenter);
        let mut on_state = move |state: SubmissionState| {
            presenter.set_ui_state(state.into());
            match state {
                SubmissionState::CheckingHealth => {
                    presenter.update_status(STATUS_CHECKING, StatusKind::Info)
                }
                SubmissionState::Deploying => {
                    presenter.update_status(STATUS_DEPLOYING, StatusKind::Info)
                }
                _ => {}
            }
        };

        let result = self.orchestrator.submit(&request, cancel, &mut on_state).await;

        match &result {
            Ok(site) => {
                self.presenter.show_site(site);
                self.notifier.show(NOTIFY_SUCCESS, StatusKind::Success);
            }
            Err(e) => {
                self.presenter
                    .update_status(&format!("{}: {}", e.heading(), e), StatusKind::Error);
                self.notifier.show(NOTIFY_FAILURE, StatusKind::Error);
            }
        }

        result
    }

    fn set_error(&mut self, field: Field, message: String) {
        self.presenter.show_field_error(field, &message);
        self.field_errors.insert(field, message);
    }

    fn clear_error(&mut self, field: Field) {
        if self.field_errors.remove(&field).is_some() {
            self.presenter.clear_field_error(field);
        }
    }
}
