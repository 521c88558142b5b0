use anyhow::Result;

use crate::models::{GenerateRequest, GenerateResponse};

/// A model-inference backend (Ollama, or a test double).
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
