//! Static page scraper.
//!
//! Readable text comes from `p`, `li` and `span` elements; an element nested
//! in another of those is read once, as part of the outer one. Images are
//! kept inline as `![alt](url)` with absolute URLs so the model can cite
//! them. Anything under `nav`, `script` or `style` is skipped.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;
use venuescout_ai::{CollaboratorError, PageScraper};

use crate::error::WebError;
use crate::transport::{check_status, compact_ws, text_content};

pub const DEFAULT_CHAR_LIMIT: usize = 10_000;

const SKIPPED_ANCESTORS: &[&str] = &["nav", "script", "style"];
const TEXT_TAGS: &[&str] = &["p", "li", "span"];

pub struct HttpScraper {
    client: reqwest::Client,
    char_limit: usize,
}

impl HttpScraper {
    pub fn new(client: reqwest::Client, char_limit: usize) -> Self {
        Self { client, char_limit }
    }

    async fn fetch(&self, url: &str) -> Result<String, WebError> {
        let resp = check_status(self.client.get(url).send().await?).await?;
        let final_url = resp.url().clone();
        let html = resp.text().await?;
        let text = extract_text(&html, Some(&final_url), self.char_limit);
        info!(url, chars = text.chars().count(), "page scraped");
        Ok(text)
    }
}

#[async_trait]
impl PageScraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<String, CollaboratorError> {
        Ok(self.fetch(url).await?)
    }
}

/// Readable text of `html`, one element per line, at most `limit` chars.
pub fn extract_text(html: &str, base: Option<&Url>, limit: usize) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p, li, span, img") else {
        return String::new();
    };

    let mut lines: Vec<String> = Vec::new();
    for elem in document.select(&selector) {
        if has_ancestor(elem, SKIPPED_ANCESTORS) {
            continue;
        }
        let line = if elem.value().name() == "img" {
            render_image(elem, base)
        } else if has_ancestor(elem, TEXT_TAGS) {
            continue;
        } else {
            Some(compact_ws(&text_content(elem)))
        };
        if let Some(line) = line.filter(|l| !l.is_empty()) {
            lines.push(line);
        }
    }

    let text = lines.join("\n");
    let truncated = truncate_chars(&text, limit);
    if truncated.len() < text.len() {
        debug!(limit, "page text truncated");
    }
    truncated.to_string()
}

fn has_ancestor(elem: ElementRef<'_>, tags: &[&str]) -> bool {
    elem.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| tags.contains(&a.value().name()))
}

fn render_image(elem: ElementRef<'_>, base: Option<&Url>) -> Option<String> {
    let src = elem.value().attr("src")?.trim();
    let url = match base {
        Some(base) => base.join(src).ok()?,
        None => Url::parse(src).ok()?,
    };
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let alt = compact_ws(elem.value().attr("alt").unwrap_or_default());
    Some(format!("![{alt}]({url})"))
}

/// Longest prefix of `text` with at most `limit` chars.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
