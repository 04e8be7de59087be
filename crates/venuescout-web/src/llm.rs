//! OpenAI-compatible chat completions client.
//!
//! Refusals are recognised in three places: a `refusal` on the returned
//! message, `finish_reason == "content_filter"`, and an error body whose
//! `code` or `type` names a content policy or guardrail.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use venuescout_ai::{CollaboratorError, TextModel};

use crate::error::WebError;
use crate::transport::check_status;

const POLICY_MARKERS: &[&str] = &["content_filter", "content_policy", "guardrail"];

/// Connection and sampling settings for one model.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    role: &'static str,
    content: Content,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: Content::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: Content::Text(text.into()),
        }
    }

    /// User turn carrying an instruction and one image URL (or data URI).
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: Content::Parts(vec![
                Part::Text { text: text.into() },
                Part::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Parts(Vec<Part>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Part {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<serde_json::Value>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl ChatClient {
    pub fn new(client: reqwest::Client, settings: ChatSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            model: settings.model,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }

    /// Same connection, different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `messages` and return the assistant's text.
    pub async fn chat(&self, messages: &[Message]) -> Result<String, WebError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(url = %url, model = %self.model, messages = messages.len(), "chat request");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let resp = match check_status(resp).await {
            Ok(resp) => resp,
            Err(WebError::Server { status, body }) => {
                if let Some(reason) = policy_refusal(&body) {
                    warn!(status, reason = %reason, "request refused by provider");
                    return Err(WebError::Refused(reason));
                }
                return Err(WebError::Server { status, body });
            }
            Err(other) => return Err(other),
        };

        let parsed: ChatResponse = resp.json().await?;
        interpret(parsed)
    }
}

#[async_trait]
impl TextModel for ChatClient {
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));
        Ok(self.chat(&messages).await?)
    }
}

fn interpret(response: ChatResponse) -> Result<String, WebError> {
    let Some(choice) = response.choices.into_iter().next() else {
        return Err(WebError::Decode("response has no choices".into()));
    };
    if let Some(refusal) = choice.message.refusal
        && !refusal.trim().is_empty()
    {
        return Err(WebError::Refused(refusal));
    }
    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(WebError::Refused("content_filter".into()));
    }
    Ok(choice.message.content.unwrap_or_default())
}

/// Reason for a policy refusal carried in an error body, if any.
fn policy_refusal(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let err = envelope.error;
    let code = match &err.code {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let kind = err.kind.unwrap_or_default();
    let tagged = [code.as_str(), kind.as_str()].iter().any(|field| {
        let field = field.to_ascii_lowercase();
        POLICY_MARKERS.iter().any(|marker| field.contains(marker))
    });
    if !tagged {
        return None;
    }
    let fallback = if code.is_empty() { kind } else { code };
    Some(err.message.filter(|m| !m.is_empty()).unwrap_or(fallback))
}
