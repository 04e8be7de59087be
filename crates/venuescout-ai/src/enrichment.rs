//! Per-candidate refinement loop.
//!
//! Each round asks the model what is missing, searches the first suggested
//! query, reads the first result not yet visited, and merges whatever the
//! model extracts from it. A page is cited only when its fragment changed
//! the record.
//!
//! ```text
//! Init ──step──▶ Refining{1} ──step──▶ ... Refining{M} ──step──▶ Done
//! ```

use std::collections::HashSet;

use tracing::{debug, info};
use venuescout_core::{Candidate, PartialRecord, merge};

use crate::collaborators::Collaborators;
use crate::config::AgentConfig;
use crate::error::{AgentError, recover};
use crate::extract::Extractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Init,
    /// The next round to run, 1-based.
    Refining { round: usize },
    Done,
}

/// What a single round achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The model suggested no follow-up queries.
    NothingMissing,
    /// Every result of the follow-up search was already visited.
    NoFreshUrls { query: String },
    /// The chosen page was unreachable or had no text.
    EmptyPage { url: String },
    /// The model's answer for the page did not parse.
    NoFragment { url: String },
    Merged { url: String, changed: bool },
}

pub struct EnrichmentLoop {
    candidate: Candidate,
    record: PartialRecord,
    citations: Vec<String>,
    visited: HashSet<String>,
    state: LoopState,
    max_rounds: usize,
}

impl EnrichmentLoop {
    /// Start from a record holding only the candidate's name, citing the page
    /// the candidate was discovered on.
    pub fn new(candidate: Candidate, max_rounds: usize) -> Self {
        let record = PartialRecord::named(candidate.name.clone());
        let citations = vec![candidate.source_url.clone()];
        let visited = HashSet::from([candidate.source_url.clone()]);
        Self {
            candidate,
            record,
            citations,
            visited,
            state: LoopState::Init,
            max_rounds,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn record(&self) -> &PartialRecord {
        &self.record
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    /// Run one round. Returns `None` once the loop is done.
    pub async fn step(
        &mut self,
        collab: Collaborators<'_>,
        config: &AgentConfig,
    ) -> Result<Option<RoundOutcome>, AgentError> {
        let round = match self.state {
            LoopState::Done => return Ok(None),
            LoopState::Init if self.max_rounds == 0 => {
                self.state = LoopState::Done;
                return Ok(None);
            }
            LoopState::Init => 1,
            LoopState::Refining { round } => round,
        };
        self.state = LoopState::Refining { round };

        let outcome = self.refine(collab, config).await?;
        debug!(candidate = %self.candidate.name, round, ?outcome, "round finished");

        let quiescent = config.stop_when_quiescent && outcome == RoundOutcome::NothingMissing;
        self.state = if round >= self.max_rounds || quiescent {
            LoopState::Done
        } else {
            LoopState::Refining { round: round + 1 }
        };
        Ok(Some(outcome))
    }

    /// Run every remaining round and hand back the record and its citations.
    pub async fn run(
        mut self,
        collab: Collaborators<'_>,
        config: &AgentConfig,
    ) -> Result<(PartialRecord, Vec<String>), AgentError> {
        while self.step(collab, config).await?.is_some() {}
        info!(
            candidate = %self.candidate.name,
            citations = self.citations.len(),
            "enrichment finished"
        );
        Ok((self.record, self.citations))
    }

    async fn refine(
        &mut self,
        collab: Collaborators<'_>,
        config: &AgentConfig,
    ) -> Result<RoundOutcome, AgentError> {
        let extractor = Extractor::new(collab.model);
        let subject = config.qualify(&self.candidate.name);

        let queries = extractor.follow_up_queries(&subject, &self.record).await?;
        let Some(query) = queries.into_iter().next() else {
            return Ok(RoundOutcome::NothingMissing);
        };
        let query = config.qualify(&query);

        let hits = recover(
            collab.search.search(&query, config.follow_up_results).await,
            "search",
        )?;
        let Some(url) = hits
            .into_iter()
            .map(|hit| hit.url)
            .find(|url| !self.visited.contains(url))
        else {
            return Ok(RoundOutcome::NoFreshUrls { query });
        };
        self.visited.insert(url.clone());

        let page = recover(collab.scraper.scrape(&url).await, "scrape")?;
        if page.trim().is_empty() {
            return Ok(RoundOutcome::EmptyPage { url });
        }

        let Some(fragment) = extractor
            .record_fragment(&self.candidate.name, &page)
            .await?
        else {
            return Ok(RoundOutcome::NoFragment { url });
        };

        let outcome = merge(&self.record, &fragment);
        if outcome.changed {
            self.citations.push(url.clone());
            self.record = outcome.merged;
        }
        Ok(RoundOutcome::Merged {
            url,
            changed: outcome.changed,
        })
    }
}
