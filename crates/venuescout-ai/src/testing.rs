//! Scripted in-memory collaborators for unit tests. Every call is recorded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use venuescout_core::{ImageDetails, SearchHit};

use crate::agent::VenueAgent;
use crate::collaborators::{Collaborators, ImageCaptioner, PageScraper, TextModel, WebSearch};
use crate::config::AgentConfig;
use crate::error::CollaboratorError;

type Scripted<T> = Result<T, CollaboratorError>;

#[derive(Default)]
pub struct ScriptedSearch {
    results: Mutex<HashMap<String, Scripted<Vec<SearchHit>>>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedSearch {
    pub fn push(&self, query: &str, result: Scripted<Vec<SearchHit>>) {
        self.results.lock().unwrap().insert(query.to_string(), result);
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for ScriptedSearch {
    async fn search(&self, query: &str, max_results: usize) -> Scripted<Vec<SearchHit>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        let scripted = self.results.lock().unwrap().get(query).cloned();
        let mut hits = scripted.unwrap_or_else(|| Ok(Vec::new()))?;
        hits.truncate(max_results);
        Ok(hits)
    }
}

/// Unknown URLs fail as transient.
#[derive(Default)]
pub struct ScriptedScraper {
    pages: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedScraper {
    pub fn push(&self, url: &str, text: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), text.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageScraper for ScriptedScraper {
    async fn scrape(&self, url: &str) -> Scripted<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| CollaboratorError::Transient(format!("{url} unreachable")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    CandidateNames,
    FollowUpQueries,
    RecordExtraction,
    Unknown,
}

impl PromptKind {
    fn of(prompt: &str) -> Self {
        if prompt.starts_with("Extract locations or events") {
            Self::CandidateNames
        } else if prompt.contains("craft a list of search queries") {
            Self::FollowUpQueries
        } else if prompt.starts_with("Extract only information relevant to") {
            Self::RecordExtraction
        } else {
            Self::Unknown
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelCall {
    pub kind: PromptKind,
    pub prompt: String,
    pub had_system_prompt: bool,
}

struct Rule {
    kind: PromptKind,
    needle: String,
    reply: Scripted<String>,
}

/// Answers by prompt kind and a substring of the prompt. Later rules win;
/// unmatched prompts get an empty answer.
#[derive(Default)]
pub struct ScriptedModel {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<ModelCall>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, kind: PromptKind, needle: &str, text: &str) -> Self {
        self.push(kind, needle, Ok(text.to_string()));
        self
    }

    pub fn fail(self, kind: PromptKind, needle: &str, err: CollaboratorError) -> Self {
        self.push(kind, needle, Err(err));
        self
    }

    pub fn push(&self, kind: PromptKind, needle: &str, reply: Scripted<String>) {
        self.rules.lock().unwrap().push(Rule {
            kind,
            needle: needle.to_string(),
            reply,
        });
    }

    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: PromptKind) -> usize {
        self.calls().iter().filter(|c| c.kind == kind).count()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn complete(&self, prompt: &str, system_prompt: Option<&str>) -> Scripted<String> {
        let kind = PromptKind::of(prompt);
        self.calls.lock().unwrap().push(ModelCall {
            kind,
            prompt: prompt.to_string(),
            had_system_prompt: system_prompt.is_some(),
        });
        self.rules
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|rule| rule.kind == kind && prompt.contains(&rule.needle))
            .map(|rule| rule.reply.clone())
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Unknown URLs fail as transient.
#[derive(Default)]
pub struct ScriptedCaptioner {
    replies: Mutex<HashMap<String, Scripted<ImageDetails>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCaptioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, url: &str, details: ImageDetails) -> Self {
        self.push(url, Ok(details));
        self
    }

    pub fn fail(self, url: &str, err: CollaboratorError) -> Self {
        self.push(url, Err(err));
        self
    }

    pub fn push(&self, url: &str, reply: Scripted<ImageDetails>) {
        self.replies.lock().unwrap().insert(url.to_string(), reply);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageCaptioner for ScriptedCaptioner {
    async fn caption(&self, image_url: &str) -> Scripted<ImageDetails> {
        self.calls.lock().unwrap().push(image_url.to_string());
        self.replies
            .lock()
            .unwrap()
            .get(image_url)
            .cloned()
            .unwrap_or_else(|| Err(CollaboratorError::Transient("no caption".into())))
    }
}

/// All four collaborators plus a config, built up fluently.
pub struct Fixture {
    pub search: Arc<ScriptedSearch>,
    pub scraper: Arc<ScriptedScraper>,
    pub model: Arc<ScriptedModel>,
    pub captioner: Arc<ScriptedCaptioner>,
    pub config: AgentConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            search: Arc::default(),
            scraper: Arc::default(),
            model: Arc::default(),
            captioner: Arc::default(),
            config: AgentConfig::default(),
        }
    }

    pub fn search(self, query: &str, urls: &[&str]) -> Self {
        let hits = urls
            .iter()
            .map(|url| SearchHit {
                title: String::new(),
                snippet: String::new(),
                url: url.to_string(),
            })
            .collect();
        self.search.push(query, Ok(hits));
        self
    }

    pub fn search_fails(self, query: &str, err: CollaboratorError) -> Self {
        self.search.push(query, Err(err));
        self
    }

    pub fn page(self, url: &str, text: &str) -> Self {
        self.scraper.push(url, text);
        self
    }

    pub fn answer(self, kind: PromptKind, needle: &str, text: &str) -> Self {
        self.model.push(kind, needle, Ok(text.to_string()));
        self
    }

    pub fn fail(self, kind: PromptKind, needle: &str, err: CollaboratorError) -> Self {
        self.model.push(kind, needle, Err(err));
        self
    }

    pub fn caption(self, url: &str, details: ImageDetails) -> Self {
        self.captioner.push(url, Ok(details));
        self
    }

    pub fn caption_fails(self, url: &str, err: CollaboratorError) -> Self {
        self.captioner.push(url, Err(err));
        self
    }

    pub fn with_config(mut self, f: impl FnOnce(&mut AgentConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            search: self.search.as_ref(),
            scraper: self.scraper.as_ref(),
            model: self.model.as_ref(),
            captioner: self.captioner.as_ref(),
        }
    }

    pub fn agent(&self) -> VenueAgent {
        VenueAgent::new(
            self.search.clone(),
            self.scraper.clone(),
            self.model.clone(),
            self.captioner.clone(),
            self.config.clone(),
        )
    }
}
