//! Submission workflow: state machine, health-check-then-deploy pipeline and orchestration

pub mod fsm;
pub mod orchestrator;
pub mod pipeline;
