use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One food item's nutrition facts, field name -> field value.
pub type NutritionRecord = BTreeMap<String, String>;

/// Records in the order their blocks appeared in the model output.
pub type NutritionRecordSet = Vec<NutritionRecord>;

/// Raw bytes of a single uploaded image.
#[derive(Debug, Clone, Default)]
pub struct ImagePayload {
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Standard base64, the form the inference service expects for images.
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Body of `POST /api/generate` on the inference service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub stream: bool,
}

impl GenerateRequest {
    pub fn text(model: &str, prompt: impl Into<String>) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.into(),
            images: Vec::new(),
            stream: false,
        }
    }

    pub fn with_image(mut self, image_base64: String) -> Self {
        self.images.push(image_base64);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl GenerateResponse {
    /// The generated text, if there is any non-blank text at all.
    pub fn text(&self) -> Option<&str> {
        self.response
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub nutrition_data: NutritionRecordSet,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
