//! Vision-model captioner. Images are fetched and inlined as base64 data
//! URIs so the model never has to reach the venue's server itself.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use venuescout_ai::{CollaboratorError, ImageCaptioner, prompts};
use venuescout_core::{ImageDetails, parse_image_details};

use crate::error::WebError;
use crate::llm::{ChatClient, Message};
use crate::transport::check_status;

const FALLBACK_MIME: &str = "image/jpeg";

pub struct VisionCaptioner {
    http: reqwest::Client,
    chat: ChatClient,
}

impl VisionCaptioner {
    /// `chat` should be bound to a vision-capable model.
    pub fn new(http: reqwest::Client, chat: ChatClient) -> Self {
        Self { http, chat }
    }

    async fn data_uri(&self, image_url: &str) -> Result<String, WebError> {
        let resp = check_status(self.http.get(image_url).send().await?).await?;
        let header_mime = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().trim().to_string())
            .filter(|v| v.starts_with("image/"));
        let bytes = resp.bytes().await?;
        let mime = header_mime
            .or_else(|| mime_from_extension(image_url).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        debug!(url = image_url, mime = %mime, bytes = bytes.len(), "image fetched");
        Ok(encode_data_uri(&mime, &bytes))
    }

    async fn describe(&self, image_url: &str) -> Result<ImageDetails, WebError> {
        let data_uri = self.data_uri(image_url).await?;
        let messages = [Message::user_with_image(prompts::image_caption(), data_uri)];
        let answer = self.chat.chat(&messages).await?;
        parse_image_details(&answer)
            .ok_or_else(|| WebError::Decode("caption answer is not image details".into()))
    }
}

#[async_trait]
impl ImageCaptioner for VisionCaptioner {
    async fn caption(&self, image_url: &str) -> Result<ImageDetails, CollaboratorError> {
        Ok(self.describe(image_url).await?)
    }
}

fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn mime_from_extension(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
