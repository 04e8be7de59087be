//! Request entry point: discovery, then enrichment and finalization of each
//! candidate in turn, then captioning.

use std::sync::Arc;

use tracing::info;
use venuescout_core::{Candidate, FinalRecord, finalize};

use crate::caption::caption_images;
use crate::collaborators::{Collaborators, ImageCaptioner, PageScraper, TextModel, WebSearch};
use crate::config::AgentConfig;
use crate::discovery::discover_candidates;
use crate::enrichment::EnrichmentLoop;
use crate::error::AgentError;

/// Extraction agent bound to a set of collaborators.
///
/// Holds no state between requests; candidates are processed one at a time.
pub struct VenueAgent {
    search: Arc<dyn WebSearch>,
    scraper: Arc<dyn PageScraper>,
    model: Arc<dyn TextModel>,
    captioner: Arc<dyn ImageCaptioner>,
    config: AgentConfig,
}

impl VenueAgent {
    pub fn new(
        search: Arc<dyn WebSearch>,
        scraper: Arc<dyn PageScraper>,
        model: Arc<dyn TextModel>,
        captioner: Arc<dyn ImageCaptioner>,
        config: AgentConfig,
    ) -> Self {
        Self {
            search,
            scraper,
            model,
            captioner,
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            search: self.search.as_ref(),
            scraper: self.scraper.as_ref(),
            model: self.model.as_ref(),
            captioner: self.captioner.as_ref(),
        }
    }

    /// Produce up to `num_results` venue records for `query`, refining each
    /// for `num_iterations` rounds.
    ///
    /// Fewer records come back when discovery finds fewer names. The only
    /// error is a policy intervention from any collaborator.
    pub async fn extract_locations(
        &self,
        query: &str,
        num_results: usize,
        num_iterations: usize,
    ) -> Result<Vec<FinalRecord>, AgentError> {
        info!(query, num_results, num_iterations, "extracting locations");
        let candidates =
            discover_candidates(self.collaborators(), &self.config, query, num_results).await?;

        let mut records = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            records.push(self.enrich(candidate, num_iterations).await?);
        }

        info!(records = records.len(), "extraction finished");
        Ok(records)
    }

    /// Refine, finalize and caption a single candidate.
    pub async fn enrich(
        &self,
        candidate: Candidate,
        num_iterations: usize,
    ) -> Result<FinalRecord, AgentError> {
        let collab = self.collaborators();
        let (record, citations) = EnrichmentLoop::new(candidate, num_iterations)
            .run(collab, &self.config)
            .await?;
        let mut finalized = finalize(&record, &citations);
        caption_images(collab.captioner, &mut finalized).await?;
        Ok(finalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use crate::testing::{Fixture, PromptKind};
    use venuescout_core::{ImageDetails, Weekday};

    fn ramen_fixture() -> Fixture {
        Fixture::new()
            .search("ramen Singapore", &["https://guide.example"])
            .page("https://guide.example", "Best ramen: Ramen House")
            .answer(PromptKind::CandidateNames, "Best ramen", r#"["Ramen House"]"#)
            .answer(PromptKind::FollowUpQueries, "", r#"["Ramen House address"]"#)
            .search(
                "Ramen House address Singapore",
                &["https://guide.example", "https://ramen.example"],
            )
            .page(
                "https://ramen.example",
                "Ramen House, 1 Orchard Road. ![bowl](https://ramen.example/bowl.jpg)",
            )
            .answer(
                PromptKind::RecordExtraction,
                "1 Orchard Road",
                r#"```json
{"name": "Ramen House", "address": "1 Orchard Road",
 "opening_hours": {"monday": {"start": "11:00", "end": "22:00"}},
 "offerings": [{"name": "Tonkotsu", "price": "$14"}],
 "images": [{"name": "bowl", "url": "https://ramen.example/bowl.jpg"}]}
```"#,
            )
    }

    #[tokio::test]
    async fn end_to_end_single_candidate() {
        let fx = ramen_fixture().caption(
            "https://ramen.example/bowl.jpg",
            ImageDetails {
                caption: "Rich pork broth, slow-simmered overnight.".into(),
                hashtags: vec!["#ramen".into()],
            },
        );
        let records = fx.agent().extract_locations("ramen", 1, 1).await.unwrap();

        assert_eq!(records.len(), 1);
        let venue = &records[0];
        assert_eq!(venue.name, "Ramen House");
        assert_eq!(venue.address, "1 Orchard Road");
        assert_eq!(venue.opening_hours.monday, "1100-2200");
        assert_eq!(venue.opening_hours.get(Weekday::Tuesday), "-");
        assert_eq!(venue.offerings["Tonkotsu"], "$14");
        assert_eq!(venue.images["bowl"].caption, "Rich pork broth, slow-simmered overnight.");
        assert_eq!(
            venue.citation,
            vec!["https://guide.example", "https://ramen.example"]
        );
    }

    #[tokio::test]
    async fn candidate_without_merges_is_still_returned() {
        let fx = Fixture::new()
            .search("bakery Singapore", &["https://list.example"])
            .page("https://list.example", "Top bakeries")
            .answer(PromptKind::CandidateNames, "Top bakeries", r#"["Crumbs"]"#);
        let records = fx.agent().extract_locations("bakery", 3, 2).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Crumbs");
        assert_eq!(records[0].address, "");
        assert_eq!(records[0].citation, vec!["https://list.example"]);
    }

    #[tokio::test]
    async fn nothing_found_yields_empty_list() {
        let fx = Fixture::new();
        let records = fx.agent().extract_locations("ramen", 5, 2).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn policy_intervention_discards_partial_results() {
        let fx = ramen_fixture().caption_fails(
            "https://ramen.example/bowl.jpg",
            CollaboratorError::PolicyIntervention("image guardrail".into()),
        );
        let err = fx.agent().extract_locations("ramen", 1, 1).await.unwrap_err();
        assert_eq!(err, AgentError::PolicyIntervention("image guardrail".into()));
    }

    #[tokio::test]
    async fn transient_caption_failure_keeps_record() {
        let fx = ramen_fixture();
        let records = fx.agent().extract_locations("ramen", 1, 1).await.unwrap();
        assert_eq!(records[0].images["bowl"].caption, "");
    }
}
