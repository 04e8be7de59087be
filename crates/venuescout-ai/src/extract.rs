//! Model-backed extraction steps. Each one builds a prompt, asks the text
//! model, and parses the answer leniently.
//!
//! A transient model failure reads as an empty answer, which every parser
//! maps to "no data". Policy interventions escalate.

use tracing::debug;
use venuescout_core::{PartialRecord, parse_listing, parse_record_fragment};

use crate::collaborators::TextModel;
use crate::error::{AgentError, recover};
use crate::prompts;

#[derive(Clone, Copy)]
pub struct Extractor<'a> {
    model: &'a dyn TextModel,
}

impl<'a> Extractor<'a> {
    pub fn new(model: &'a dyn TextModel) -> Self {
        Self { model }
    }

    /// Venue or event names in `document` that relate to `query`.
    pub async fn candidate_names(
        &self,
        query: &str,
        document: &str,
    ) -> Result<Vec<String>, AgentError> {
        let prompt = prompts::candidate_names(query, document);
        let answer = recover(self.model.complete(&prompt, None).await, "complete")?;
        let names = parse_listing(&answer);
        debug!(count = names.len(), "candidate names extracted");
        Ok(names)
    }

    /// Search queries that would fill the gaps in `record`. Empty when the
    /// model considers the record complete.
    pub async fn follow_up_queries(
        &self,
        subject: &str,
        record: &PartialRecord,
    ) -> Result<Vec<String>, AgentError> {
        let information = serde_json::to_string(record).unwrap_or_default();
        let prompt = prompts::follow_up_queries(subject, &information);
        let answer = recover(self.model.complete(&prompt, None).await, "complete")?;
        Ok(parse_listing(&answer))
    }

    /// Record fragment about `name` found in `document`, if the answer parses.
    pub async fn record_fragment(
        &self,
        name: &str,
        document: &str,
    ) -> Result<Option<PartialRecord>, AgentError> {
        let prompt = prompts::record_extraction(name, document);
        let system = prompts::record_extraction_system();
        let answer = recover(
            self.model.complete(&prompt, Some(&system)).await,
            "complete",
        )?;
        Ok(parse_record_fragment(&answer))
    }
}
