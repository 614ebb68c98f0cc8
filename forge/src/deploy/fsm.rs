//! Finite State Machine for a deploy submission

use serde::Serialize;

use crate::errors::{HostforgeError, SubmitError};

/// Submission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing submitted yet
    Idle,

    /// Waiting on `GET /status`
    CheckingHealth,

    /// Waiting on `POST /deploy`
    Deploying,

    /// Site deployed
    Succeeded,

    /// Health check, deploy or transport failed, or the user cancelled
    Failed,
}

impl SubmissionState {
    /// Whether a submission is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::CheckingHealth | SubmissionState::Deploying)
    }
}

/// Submission event
#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// A validated form was submitted
    Submit,

    /// The backend reported healthy
    HealthOk,

    /// The deploy call succeeded
    DeploySuccess,

    /// Any step failed
    Fail(SubmitError),

    /// The user aborted the in-flight step
    Cancel,

    /// Back to the initial state
    Reset,
}

/// Submission FSM
#[derive(Debug, Clone)]
pub struct SubmissionFsm {
    state: SubmissionState,
    error: Option<SubmitError>,
    attempts: u32,
}

impl SubmissionFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            error: None,
            attempts: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Error that put the machine in `Failed`, if any
    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    /// Number of submissions that reached the health check
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: SubmissionEvent) -> Result<SubmissionState, HostforgeError> {
        use SubmissionEvent as E;
        use SubmissionState as S;

        let new_state = match (self.state, &event) {
            // Any resting state accepts a new submission
            (S::Idle | S::Succeeded | S::Failed, E::Submit) => {
                self.error = None;
                self.attempts += 1;
                S::CheckingHealth
            }

            // From CheckingHealth
            (S::CheckingHealth, E::HealthOk) => S::Deploying,

            // From Deploying
            (S::Deploying, E::DeploySuccess) => S::Succeeded,

            // In flight
            (S::CheckingHealth | S::Deploying, E::Fail(err)) => {
                self.error = Some(err.clone());
                S::Failed
            }
            (S::CheckingHealth | S::Deploying, E::Cancel) => {
                self.error = Some(SubmitError::Cancelled);
                S::Failed
            }

            // From terminal states
            (S::Succeeded | S::Failed, E::Reset) => {
                self.error = None;
                S::Idle
            }

            // Invalid transitions
            (state, event) => {
                return Err(HostforgeError::InvalidTransition(format!(
                    "{:?} -> {:?}",
                    state, event
                )));
            }
        };

        self.state = new_state;
        Ok(new_state)
    }
}

impl Default for SubmissionFsm {
    fn default() -> Self {
        Self::new()
    }
}
