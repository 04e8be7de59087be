use thiserror::Error;
use venuescout_ai::CollaboratorError;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("refused by content policy: {0}")]
    Refused(String),
}

impl From<WebError> for CollaboratorError {
    fn from(err: WebError) -> Self {
        match err {
            WebError::Refused(reason) => CollaboratorError::PolicyIntervention(reason),
            other => CollaboratorError::Transient(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_maps_to_policy_intervention() {
        let err: CollaboratorError = WebError::Refused("guardrail_intervened".into()).into();
        assert_eq!(
            err,
            CollaboratorError::PolicyIntervention("guardrail_intervened".into())
        );
    }

    #[test]
    fn server_error_maps_to_transient() {
        let err: CollaboratorError = WebError::Server {
            status: 503,
            body: "busy".into(),
        }
        .into();
        assert_eq!(
            err,
            CollaboratorError::Transient("server returned 503: busy".into())
        );
    }
}
