use crate::config::AnthropicConfig;
use crate::domain::GenerativeBackend;
use crate::errors::BackendError;
use crate::models::{Category, Platform};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1200;
const TEMPERATURE: f64 = 0.8;

/// Client for an Anthropic-style messages API.
///
/// Owns its HTTP connection pool; constructed once at startup and shared via
/// the app state. Failures are terminal for the request, there are no
/// internal retries.
#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicBackend {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

fn build_prompt(platform: Platform, category: Category) -> String {
    format!(
        r##"You are a Pakistani social media content expert who creates viral meme concepts.
Create exactly 5 unique ideas for platform "{platform}" in category "{category}".
Keep language natural for Pakistan-based social audiences.
Return ONLY valid JSON (no markdown, no extra text) as an array of 5 objects.
Each object must use this exact schema:
{{
  "meme_text": "string",
  "caption": "string",
  "format": "static_image" | "video" | "text_only",
  "hashtags": ["#tag1", "#tag2", "#tag3"]
}}"##
    )
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentChunk>,
}

#[derive(Deserialize)]
struct ContentChunk {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// The first text chunk of the reply, or empty when there is none.
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .find_map(|chunk| match chunk {
                ContentChunk {
                    kind,
                    text: Some(text),
                } if kind == "text" => Some(text),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeBackend for AnthropicBackend {
    async fn generate_raw(
        &self,
        platform: Platform,
        category: Category,
    ) -> Result<String, BackendError> {
        let url = self.messages_url();
        let body = json!({
            "model": self.config.model,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "messages": [
                {
                    "role": "user",
                    "content": build_prompt(platform, category),
                }
            ],
        });

        tracing::debug!(%platform, %category, model = %self.config.model, "Requesting ideas from generative backend");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .context("Sending request to generative backend")?;

        let status = response.status();
        if !status.is_success() {
            // Keep the raw provider body; it goes out in the error details.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Generative backend returned non-success status");
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: MessagesResponse = response
            .json()
            .await
            .context("Decoding generative backend response")?;

        let text = payload.into_text();
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        tracing::debug!(output_len = text.len(), "Generative backend responded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnthropicConfig;

    fn config(base_url: &str) -> AnthropicConfig {
        AnthropicConfig {
            api_key: "sk-ant-test".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_messages_url_handles_trailing_slash() {
        let backend = AnthropicBackend::new(config("https://api.anthropic.com/"));
        assert_eq!(backend.messages_url(), "https://api.anthropic.com/v1/messages");

        let backend = AnthropicBackend::new(config("http://localhost:8080"));
        assert_eq!(backend.messages_url(), "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_prompt_names_platform_and_category() {
        let prompt = build_prompt(Platform::Tiktok, Category::CampusHumor);
        assert!(prompt.contains("platform \"tiktok\""));
        assert!(prompt.contains("category \"campus_humor\""));
        assert!(prompt.contains("exactly 5 unique ideas"));
        assert!(prompt.contains("\"static_image\" | \"video\" | \"text_only\""));
    }

    #[test]
    fn test_response_decode_picks_first_text_chunk() {
        let raw = serde_json::json!({
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "[1,2,3]" },
                { "type": "text", "text": "ignored" }
            ]
        });
        let payload: MessagesResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.into_text(), "[1,2,3]");
    }

    #[test]
    fn test_response_without_text_chunks_decodes_to_empty() {
        let payload: MessagesResponse =
            serde_json::from_value(serde_json::json!({ "content": [] })).unwrap();
        assert_eq!(payload.into_text(), "");
    }
}
