//! HTTP implementations of the agent's collaborators: chat and vision
//! models behind an OpenAI-compatible API, DuckDuckGo search, and a static
//! page scraper.

pub mod caption;
pub mod error;
pub mod llm;
pub mod scrape;
pub mod search;
pub mod transport;

pub use caption::VisionCaptioner;
pub use error::WebError;
pub use llm::{ChatClient, ChatSettings, Message};
pub use scrape::HttpScraper;
pub use search::DuckDuckGoSearch;
pub use transport::build_client;
