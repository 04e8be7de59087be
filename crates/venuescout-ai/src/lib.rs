//! Venue extraction agent.
//!
//! Given a free-text query, discovers candidate venues on the web, refines a
//! record for each through repeated search-and-extract rounds, and captions
//! the images found. Search, scraping and the models are reached through the
//! traits in [`collaborators`].

pub mod agent;
pub mod caption;
pub mod collaborators;
pub mod config;
pub mod discovery;
pub mod enrichment;
pub mod error;
pub mod extract;
pub mod prompts;

#[cfg(test)]
mod testing;

pub use agent::VenueAgent;
pub use collaborators::{Collaborators, ImageCaptioner, PageScraper, TextModel, WebSearch};
pub use config::AgentConfig;
pub use enrichment::{EnrichmentLoop, LoopState, RoundOutcome};
pub use error::{AgentError, CollaboratorError};
