//! FSM unit tests

use hostforge::deploy::fsm::{SubmissionEvent, SubmissionFsm, SubmissionState};
use hostforge::errors::SubmitError;
use hostforge::ui::presenter::UiState;

#[test]
fn test_fsm_initial_state() {
    let fsm = SubmissionFsm::new();
    assert_eq!(fsm.state(), SubmissionState::Idle);
    assert!(fsm.error().is_none());
    assert_eq!(fsm.attempts(), 0);
}

#[test]
fn test_fsm_success_flow() {
    let mut fsm = SubmissionFsm::new();

    // Idle -> CheckingHealth -> Deploying -> Succeeded
    fsm.process(SubmissionEvent::Submit).unwrap();
    fsm.process(SubmissionEvent::HealthOk).unwrap();
    assert_eq!(fsm.state(), SubmissionState::Deploying);
    fsm.process(SubmissionEvent::DeploySuccess).unwrap();
    assert_eq!(fsm.state(), SubmissionState::Succeeded);
    assert_eq!(fsm.attempts(), 1);
}

#[test]
fn test_fsm_retry_after_failure() {
    let mut fsm = SubmissionFsm::new();

    fsm.process(SubmissionEvent::Submit).unwrap();
    fsm.process(SubmissionEvent::HealthOk).unwrap();
    let failure = SubmitError::DeploymentFailed("HTTP error! status: 500".to_string());
    fsm.process(SubmissionEvent::Fail(failure)).unwrap();
    assert_eq!(fsm.state(), SubmissionState::Failed);

    // A new submit clears the previous error and starts from the health check
    fsm.process(SubmissionEvent::Submit).unwrap();
    assert_eq!(fsm.state(), SubmissionState::CheckingHealth);
    assert!(fsm.error().is_none());
    assert_eq!(fsm.attempts(), 2);
}

#[test]
fn test_fsm_cancel_marks_failed() {
    let mut fsm = SubmissionFsm::new();

    fsm.process(SubmissionEvent::Submit).unwrap();
    fsm.process(SubmissionEvent::Cancel).unwrap();

    assert_eq!(fsm.state(), SubmissionState::Failed);
    assert_eq!(fsm.error(), Some(&SubmitError::Cancelled));
}

#[test]
fn test_fsm_invalid_transitions() {
    let mut fsm = SubmissionFsm::new();

    // Nothing to deploy before the health check
    assert!(fsm.process(SubmissionEvent::HealthOk).is_err());
    assert!(fsm.process(SubmissionEvent::Cancel).is_err());

    // No second submission while one is in flight
    fsm.process(SubmissionEvent::Submit).unwrap();
    assert!(fsm.process(SubmissionEvent::Submit).is_err());
    assert!(fsm.process(SubmissionEvent::DeploySuccess).is_err());
    assert_eq!(fsm.state(), SubmissionState::CheckingHealth);
}

#[test]
fn test_ui_state_mapping() {
    assert_eq!(UiState::from(SubmissionState::Idle), UiState::Idle);
    assert_eq!(UiState::from(SubmissionState::CheckingHealth), UiState::Submitting);
    assert_eq!(UiState::from(SubmissionState::Deploying), UiState::Submitting);
    assert_eq!(UiState::from(SubmissionState::Succeeded), UiState::Success);
    assert_eq!(UiState::from(SubmissionState::Failed), UiState::Failed);
    assert!(!UiState::Submitting.submit_enabled());
    assert!(UiState::Failed.submit_enabled());
}
