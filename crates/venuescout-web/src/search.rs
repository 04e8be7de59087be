//! DuckDuckGo HTML search.

use std::collections::HashSet;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;
use venuescout_ai::{CollaboratorError, WebSearch};
use venuescout_core::SearchHit;

use crate::error::WebError;
use crate::transport::{check_status, compact_ws, text_content};

pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    endpoint: String,
    /// `kl` region code, e.g. `sg-en`.
    region: String,
}

impl DuckDuckGoSearch {
    pub fn new(client: reqwest::Client, region: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: region.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, WebError> {
        info!(query, region = %self.region, max_results, "searching");
        let mut hits: Vec<SearchHit> = Vec::new();
        let mut offset = 0;
        for page in 0..MAX_PAGES {
            let resp = self
                .client
                .get(&self.endpoint)
                .query(&page_params(query, &self.region, offset))
                .send()
                .await?;
            let html = check_status(resp).await?.text().await?;
            let page_hits = parse_results(&html, usize::MAX);
            let challenged = page_hits.is_empty() && html.to_ascii_lowercase().contains("anomaly");
            if page == 0 && challenged {
                return Err(WebError::Decode("search engine served a bot challenge".into()));
            }
            offset += page_hits.len();
            let added = absorb(&mut hits, page_hits, max_results);
            debug!(page, added, total = hits.len(), "search page parsed");
            if added == 0 || hits.len() >= max_results {
                break;
            }
        }
        Ok(hits)
    }
}

/// Result pages fetched per search at most.
const MAX_PAGES: usize = 3;

/// Query string for one result page; `s` is the number of results to skip.
fn page_params(query: &str, region: &str, offset: usize) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", query.to_string()),
        ("kl", region.to_string()),
        ("df", "y".to_string()),
    ];
    if offset > 0 {
        params.push(("s", offset.to_string()));
        params.push(("dc", (offset + 1).to_string()));
    }
    params
}

/// Append unseen hits until `limit`; returns how many were added.
fn absorb(hits: &mut Vec<SearchHit>, page: Vec<SearchHit>, limit: usize) -> usize {
    let before = hits.len();
    for hit in page {
        if hits.len() >= limit {
            break;
        }
        if hits.iter().all(|h| h.url != hit.url) {
            hits.push(hit);
        }
    }
    hits.len() - before
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CollaboratorError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        Ok(self.fetch(query, max_results).await?)
    }
}

/// Organic results from a DuckDuckGo HTML page, deduplicated by URL.
pub fn parse_results(html: &str, limit: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let (Ok(container), Ok(title), Ok(anchor), Ok(snippet)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse("a[href]"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for result in document.select(&container) {
        if out.len() >= limit {
            break;
        }
        if is_ad(result) {
            continue;
        }
        let Some(link) = result
            .select(&title)
            .next()
            .or_else(|| result.select(&anchor).next())
        else {
            continue;
        };
        let Some(url) = link.value().attr("href").and_then(normalize_href) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }
        out.push(SearchHit {
            title: compact_ws(&text_content(link)),
            snippet: result
                .select(&snippet)
                .next()
                .map(|s| compact_ws(&text_content(s)))
                .unwrap_or_default(),
            url,
        });
    }
    out
}

fn is_ad(result: ElementRef<'_>) -> bool {
    result
        .value()
        .classes()
        .any(|class| class == "result--ad")
}

/// Absolute destination URL of a result link, unwrapping `/l/?uddg=` redirects.
pub fn normalize_href(href: &str) -> Option<String> {
    let href = href.trim();
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };
    if !(absolute.starts_with("http://") || absolute.starts_with("https://")) {
        return None;
    }
    Some(decode_redirect(&absolute).unwrap_or(absolute))
}

fn decode_redirect(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    if !host.ends_with("duckduckgo.com") || !parsed.path().starts_with("/l/") {
        return None;
    }
    let target = parsed
        .query_pairs()
        .find(|(k, _)| k == "uddg")
        .map(|(_, v)| v.trim().to_string())?;
    if !(target.starts_with("http://") || target.starts_with("https://")) {
        return None;
    }
    match Url::parse(&target) {
        Ok(mut dest) => {
            dest.set_fragment(None);
            Some(dest.to_string())
        }
        Err(_) => Some(target),
    }
}
