//! Candidate discovery: search, read each result page, collect names.

use std::collections::HashSet;

use tracing::{debug, info};
use venuescout_core::Candidate;

use crate::collaborators::Collaborators;
use crate::config::AgentConfig;
use crate::error::{AgentError, recover};
use crate::extract::Extractor;

/// Find up to `target` distinct candidate names for `query`.
///
/// Names keep first-seen order. Search is repeated with a wider window, up
/// to `config.discovery_max_searches` times, until enough names are found or
/// no unconsulted result remains.
pub async fn discover_candidates(
    collab: Collaborators<'_>,
    config: &AgentConfig,
    query: &str,
    target: usize,
) -> Result<Vec<Candidate>, AgentError> {
    if target == 0 {
        return Ok(Vec::new());
    }

    let query = config.qualify(query);
    let extractor = Extractor::new(collab.model);
    let mut found: Vec<Candidate> = Vec::new();
    let mut names: HashSet<String> = HashSet::new();
    let mut consulted: HashSet<String> = HashSet::new();

    'searches: for attempt in 1..=config.discovery_max_searches.max(1) {
        let window = config.discovery_page_size.max(1) * attempt;
        let hits = recover(collab.search.search(&query, window).await, "search")?;
        debug!(attempt, window, hits = hits.len(), "discovery search");

        let mut fresh = 0;
        for hit in hits {
            if !consulted.insert(hit.url.clone()) {
                continue;
            }
            fresh += 1;

            let page = recover(collab.scraper.scrape(&hit.url).await, "scrape")?;
            if page.trim().is_empty() {
                debug!(url = %hit.url, "empty page, skipping");
                continue;
            }

            for name in extractor.candidate_names(&query, &page).await? {
                if names.insert(name.clone()) {
                    found.push(Candidate {
                        name,
                        source_url: hit.url.clone(),
                    });
                }
            }
            if found.len() >= target {
                break 'searches;
            }
        }

        if fresh == 0 {
            debug!(attempt, "no unconsulted results left");
            break;
        }
    }

    found.truncate(target);
    info!(query = %query, candidates = found.len(), target, "discovery finished");
    Ok(found)
}
