//! Shared HTTP plumbing.

use std::time::Duration;

use reqwest::{Client, Response, redirect};
use scraper::ElementRef;

use crate::error::WebError;

/// Desktop browser User-Agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

const MAX_REDIRECTS: usize = 5;

/// Client used by every collaborator in this crate.
pub fn build_client(timeout: Duration) -> Result<Client, WebError> {
    Ok(Client::builder()
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()?)
}

/// Turn a non-success response into [`WebError::Server`].
pub(crate) async fn check_status(resp: Response) -> Result<Response, WebError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(WebError::Server {
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn text_content(elem: ElementRef<'_>) -> String {
    elem.text().collect::<Vec<_>>().join(" ")
}

pub(crate) fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
