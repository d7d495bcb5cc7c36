//! Chat-completion client that turns an article into a spoken-word story.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use placewalk_common::{ArticleResult, LocationContext, NarrationConfig, PlaceCandidate};

use crate::error::{NarrateError, Result};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 500;

pub struct StoryComposer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl StoryComposer {
    pub fn new(api_key: &str, base_url: &str, config: &NarrationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    /// Generate a narrative story for a resolved place. `place` is absent
    /// on the manual search path.
    pub async fn compose(
        &self,
        place: Option<&PlaceCandidate>,
        article: &ArticleResult,
        ctx: &LocationContext,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(place, article, ctx),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(model = %self.model, title = article.title.as_str(), "Requesting story");

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(NarrateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(NarrateError::EmptyResponse)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_the_chat_wire_shape() {
        let request = ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: "hello".to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn response_text_is_first_choice_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "Once upon a time..."}}]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Once upon a time...")
        );
    }

    #[test]
    fn base_url_is_configurable_and_trimmed() {
        let config = NarrationConfig::default();
        let composer = StoryComposer::new("key", "http://localhost:8080/v1/", &config);
        assert_eq!(composer.base_url, "http://localhost:8080/v1");
        assert_eq!(composer.model, "gpt-4");
    }

    #[test]
    fn null_content_parses_as_none() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
