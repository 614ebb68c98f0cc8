//! Drives one submission through the state machine and the pipeline

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

use crate::deploy::fsm::{SubmissionEvent, SubmissionFsm, SubmissionState};
use crate::deploy::pipeline::{cancellable, check_health, deploy};
use crate::errors::SubmitError;
use crate::http::backend::DeployBackend;
use crate::models::deploy::{DeployRequest, DeployedSite};
use crate::utils::generate_uuid;

/// Submission orchestrator
pub struct Orchestrator {
    backend: Arc<dyn DeployBackend>,
    fsm: SubmissionFsm,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn DeployBackend>) -> Self {
        Self {
            backend,
            fsm: SubmissionFsm::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.fsm.state()
    }

    pub fn error(&self) -> Option<&SubmitError> {
        self.fsm.error()
    }

    pub fn attempts(&self) -> u32 {
        self.fsm.attempts()
    }

    /// Run health check then deploy for an already validated request.
    ///
    /// Always finishes in `Succeeded` or `Failed`. Cancelling `cancel` fails the
    /// flow with [`SubmitError::Cancelled`] and drops any in-flight response.
    ///
    /// `on_state` sees every state the submission enters, in order.
    pub async fn submit<F>(
        &mut self,
        request: &DeployRequest,
        cancel: &CancellationToken,
        on_state: &mut F,
    ) -> Result<DeployedSite, SubmitError>
    where
        F: FnMut(SubmissionState) + Send,
    {
        let attempt_id = generate_uuid();
        let span = info_span!(
            "submission",
            %attempt_id,
            storage_account = request.storage_account_name(),
            location = request.location()
        );
        self.run(request, cancel, on_state).instrument(span).await
    }

    async fn run<F>(
        &mut self,
        request: &DeployRequest,
        cancel: &CancellationToken,
        on_state: &mut F,
    ) -> Result<DeployedSite, SubmitError>
    where
        F: FnMut(SubmissionState) + Send,
    {
        let backend = Arc::clone(&self.backend);
        let mut flight = InFlight::start(&mut self.fsm, on_state)?;

        let result = match cancellable(cancel, check_health(backend.as_ref())).await {
            Ok(healthy) => {
                info!("Backend healthy ({})", healthy.status().status);
                flight.advance(SubmissionEvent::HealthOk);
                cancellable(cancel, deploy(backend.as_ref(), &healthy, request)).await
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(site) => {
                info!("Deployment successful: {}", site.url);
                flight.advance(SubmissionEvent::DeploySuccess);
            }
            Err(SubmitError::Cancelled) => {
                warn!("Deployment cancelled by user");
                flight.advance(SubmissionEvent::Cancel);
            }
            Err(e) => {
                warn!("Deployment failed: {}", e);
                flight.advance(SubmissionEvent::Fail(e.clone()));
            }
        }

        result
    }
}

/// A submission between `Submit` and a terminal state
///
/// Every state change is reported to `on_state`. If the submission future is
/// dropped before finishing, the machine is cancelled into `Failed` so the
/// next submit starts from a resting state.
struct InFlight<'a, F: FnMut(SubmissionState)> {
    fsm: &'a mut SubmissionFsm,
    on_state: &'a mut F,
}

impl<'a, F: FnMut(SubmissionState)> InFlight<'a, F> {
    /// Enter `CheckingHealth`, or refuse if a submission is already running
    fn start(fsm: &'a mut SubmissionFsm, on_state: &'a mut F) -> Result<Self, SubmitError> {
        let state = fsm.process(SubmissionEvent::Submit).map_err(|e| {
            error!("Submission refused: {}", e);
            SubmitError::Busy
        })?;
        on_state(state);
        Ok(Self { fsm, on_state })
    }

    fn advance(&mut self, event: SubmissionEvent) {
        match self.fsm.process(event) {
            Ok(state) => (self.on_state)(state),
            Err(e) => error!("Submission state machine rejected event: {}", e),
        }
    }
}

impl<F: FnMut(SubmissionState)> Drop for InFlight<'_, F> {
    fn drop(&mut self) {
        if self.fsm.state().is_busy() {
            warn!("Submission abandoned while {:?}", self.fsm.state());
            self.advance(SubmissionEvent::Cancel);
        }
    }
}
