use anyhow::{Context, Result};

use crate::models::{GenerateRequest, GenerateResponse};
use crate::services::inference::InferenceClient;

/// Client for a local Ollama server's `/api/generate` endpoint.
pub struct OllamaClient {
    host: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(host: String) -> Self {
        Self {
            host,
            client: reqwest::Client::new(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.host.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        log::debug!(
            "📤 Ollama request: model={}, prompt={} chars, images={}",
            request.model,
            request.prompt.len(),
            request.images.len()
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .with_context(|| format!("failed to reach Ollama at {}", self.host))?;

        let status = response.status();
        log::debug!("📥 Ollama response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Ollama API error ({}): {}", status, error_text);
            anyhow::bail!("Ollama API error ({}): {}", status, error_text);
        }

        let body = response.text().await?;
        log::debug!("📄 Raw Ollama response size: {} bytes", body.len());

        let generated: GenerateResponse =
            serde_json::from_str(&body).context("failed to parse Ollama response")?;
        log::debug!("✅ Parsed Ollama response from {} (done={})", generated.model, generated.done);

        Ok(generated)
    }
}
