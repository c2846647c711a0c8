//! Google Gemini generateContent backend.

use super::LlmClient;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const GENERATE_CONTENT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    pub model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// `timeout_secs` bounds a single call; zero disables the bound.
    pub fn new(model: String, api_key: String, timeout_secs: u64) -> Self {
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        Self {
            model,
            api_key,
            client: builder.build().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<String> {
        // Gemini has no dedicated system role on this endpoint; fold any
        // system text into the single user turn.
        let text = match system {
            Some(system) => format!("{}\n\n{}", system, prompt),
            None => prompt.to_string(),
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GENERATE_CONTENT_BASE, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
        });

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!("Gemini API error (status {}): {}", status, error_text);
        }

        let json: serde_json::Value = resp.json().await?;
        let text = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Gemini API response missing text"))?
            .to_string();

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
