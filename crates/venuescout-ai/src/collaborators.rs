//! Narrow interfaces to the systems the agent consults.
//!
//! Implementations own retries, timeouts and authentication. The agent only
//! distinguishes a value, a transient failure, and a policy intervention.

use async_trait::async_trait;
use venuescout_core::{ImageDetails, SearchHit};

use crate::error::CollaboratorError;

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Up to `max_results` results for `query`, best first.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CollaboratorError>;
}

#[async_trait]
pub trait PageScraper: Send + Sync {
    /// Readable page text, truncated to a fixed length. Empty when the page
    /// had nothing to read.
    async fn scrape(&self, url: &str) -> Result<String, CollaboratorError>;
}

#[async_trait]
pub trait TextModel: Send + Sync {
    /// Free-text completion. No structure is guaranteed.
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, CollaboratorError>;
}

#[async_trait]
pub trait ImageCaptioner: Send + Sync {
    /// Caption and hashtags for the image at `image_url`.
    async fn caption(&self, image_url: &str) -> Result<ImageDetails, CollaboratorError>;
}

/// Borrowed set of collaborators for one request.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub search: &'a dyn WebSearch,
    pub scraper: &'a dyn PageScraper,
    pub model: &'a dyn TextModel,
    pub captioner: &'a dyn ImageCaptioner,
}
