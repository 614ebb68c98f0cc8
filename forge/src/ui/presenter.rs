//! Presenter trait the controller renders through

use serde::Serialize;

use crate::deploy::fsm::SubmissionState;
use crate::models::deploy::{DeployedSite, Field};
use crate::ui::notify::Notification;

/// Appearance of the submit control and status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    Idle,
    Submitting,
    Success,
    Failed,
}

impl From<SubmissionState> for UiState {
    fn from(state: SubmissionState) -> Self {
        match state {
            SubmissionState::Idle => UiState::Idle,
            SubmissionState::CheckingHealth | SubmissionState::Deploying => UiState::Submitting,
            SubmissionState::Succeeded => UiState::Success,
            SubmissionState::Failed => UiState::Failed,
        }
    }
}

impl UiState {
    /// Whether the submit control accepts clicks
    pub fn submit_enabled(&self) -> bool {
        !matches!(self, UiState::Submitting)
    }
}

/// Tone of a status or notification message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Everything the controller shows to the user goes through here
pub trait Presenter: Send + Sync {
    /// Fill the region selector
    fn render_locations(&self, options: &[&str], selected: &str);

    /// Submit control and banner appearance
    fn set_ui_state(&self, state: UiState);

    /// Main status area
    fn update_status(&self, message: &str, kind: StatusKind);

    /// Success banner with the deployed site's details
    fn show_site(&self, site: &DeployedSite);

    /// Inline error next to a field
    fn show_field_error(&self, field: Field, message: &str);

    fn clear_field_error(&self, field: Field);

    /// Label of the file input, e.g. `site.zip (1.50 MB)`
    fn update_file_label(&self, label: &str);

    /// Drop zone highlight while a drag hovers it
    fn set_drop_highlight(&self, highlighted: bool);

    /// Transient banner
    fn show_notification(&self, notification: &Notification);

    fn dismiss_notification(&self, notification: &Notification);
}
