use thiserror::Error;
use tracing::warn;

/// What a collaborator (search, scrape, model, captioner) may signal besides
/// a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Content moderation or guardrail refusal. Never recovered locally.
    #[error("policy intervention: {0}")]
    PolicyIntervention(String),
    /// Network, timeout, or provider failure. Skipped by the agent.
    #[error("collaborator unavailable: {0}")]
    Transient(String),
}

/// The only error that escapes the agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("policy intervention: {0}")]
    PolicyIntervention(String),
}

/// Replace a transient failure by the call's empty value; escalate policy
/// interventions.
pub(crate) fn recover<T: Default>(
    result: Result<T, CollaboratorError>,
    call: &'static str,
) -> Result<T, AgentError> {
    match result {
        Ok(value) => Ok(value),
        Err(CollaboratorError::PolicyIntervention(reason)) => {
            warn!(call, reason = %reason, "policy intervention");
            Err(AgentError::PolicyIntervention(reason))
        }
        Err(CollaboratorError::Transient(reason)) => {
            warn!(call, reason = %reason, "collaborator call failed, skipping");
            Ok(T::default())
        }
    }
}
