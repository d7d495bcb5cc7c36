//! ElevenLabs text-to-speech: story text in, MP3 bytes out.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use placewalk_common::NarrationConfig;

use crate::error::{NarrateError, Result};

pub struct SpeechClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
    output_format: String,
}

impl SpeechClient {
    pub fn new(api_key: &str, base_url: &str, config: &NarrationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            voice_id: config.voice_id.clone(),
            model_id: config.speech_model.clone(),
            output_format: config.output_format.clone(),
        }
    }

    /// Synthesize speech for the story text. Returns encoded audio in the
    /// configured output format.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/v1/text-to-speech/{}?output_format={}",
            self.base_url, self.voice_id, self.output_format
        );

        debug!(voice_id = %self.voice_id, chars = text.len(), "Synthesizing speech");

        let resp = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&SpeechRequest {
                text,
                model_id: &self.model_id,
            })
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

        Ok(resp.bytes().await?.to_vec())
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_text_and_model() {
        let body = serde_json::to_value(SpeechRequest {
            text: "Four bronze lions...",
            model_id: "eleven_monolingual_v1",
        })
        .unwrap();
        assert_eq!(body["text"], "Four bronze lions...");
        assert_eq!(body["model_id"], "eleven_monolingual_v1");
    }

    #[test]
    fn endpoint_includes_voice_and_format() {
        let config = NarrationConfig::default();
        let endpoints = placewalk_common::EndpointsConfig::default();
        let client = SpeechClient::new("key", &endpoints.elevenlabs, &config);
        let url = format!(
            "{}/v1/text-to-speech/{}?output_format={}",
            client.base_url, client.voice_id, client.output_format
        );
        assert_eq!(
            url,
            "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM?output_format=mp3_44100_128"
        );
    }
}
