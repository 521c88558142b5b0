use std::sync::Arc;

use crate::error::AnalysisError;
use crate::models::{GenerateRequest, ImagePayload, NutritionRecordSet};
use crate::services::nutrition_parser::parse_nutrition_text;
use crate::services::prompts::{build_nutrition_prompt, VISION_PROMPT};
use crate::services::InferenceClient;

/// Runs the two-stage analysis: identify the food in an image with the
/// vision model, then ask the text model for its nutrition breakdown.
pub struct FoodAnalyzer {
    client: Arc<dyn InferenceClient>,
    vision_model: String,
    text_model: String,
}

impl FoodAnalyzer {
    pub fn new(client: Arc<dyn InferenceClient>, vision_model: String, text_model: String) -> Self {
        Self {
            client,
            vision_model,
            text_model,
        }
    }

    pub async fn analyze_image(&self, image: &ImagePayload) -> Result<NutritionRecordSet, AnalysisError> {
        if image.is_empty() {
            return Err(AnalysisError::MissingInput);
        }

        log::info!("📸 Sending image ({} bytes) to {} model...", image.len(), self.vision_model);
        let vision_request = GenerateRequest::text(&self.vision_model, VISION_PROMPT)
            .with_image(image.to_base64());
        let food_description = self.generate_text(vision_request).await?;
        log::info!("🍽️ {} identified: {}", self.vision_model, food_description.trim());

        log::info!("🤖 Sending nutrition request to {} model...", self.text_model);
        let nutrition_request =
            GenerateRequest::text(&self.text_model, build_nutrition_prompt(&food_description));
        let nutrition_text = self.generate_text(nutrition_request).await?;
        log::debug!("💬 {} response: {}", self.text_model, nutrition_text);

        let records = parse_nutrition_text(&nutrition_text);
        log::info!("✅ Structured nutrition data: {:?}", records);

        Ok(records)
    }

    /// One upstream call; a missing or blank response is an error.
    async fn generate_text(&self, request: GenerateRequest) -> Result<String, AnalysisError> {
        let model = request.model.clone();

        let response = self
            .client
            .generate(request)
            .await
            .map_err(|source| AnalysisError::UpstreamTransportFailure {
                model: model.clone(),
                source,
            })?;

        match response.text() {
            Some(text) => Ok(text.to_string()),
            None => Err(AnalysisError::UpstreamEmptyResponse { model }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inference::testing::ScriptedClient;
    use crate::services::prompts::NUTRITION_FORMAT_EXAMPLE;

    fn analyzer(client: Arc<ScriptedClient>) -> FoodAnalyzer {
        FoodAnalyzer::new(client, "llava:7b".to_string(), "mistral".to_string())
    }

    fn image() -> ImagePayload {
        ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0])
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply(" Pizza, salad")
                .reply("Food Item: Pizza\nCalories: 285\n\nFood Item: Salad\nCalories: 150"),
        );
        let records = analyzer(client.clone()).analyze_image(&image()).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Food Item"], "Pizza");
        assert_eq!(records[1]["Calories"], "150");

        let requests = client.requests();
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].model, "llava:7b");
        assert_eq!(requests[0].prompt, VISION_PROMPT);
        assert_eq!(requests[0].images, vec!["/9j/4A==".to_string()]);

        assert_eq!(requests[1].model, "mistral");
        assert_eq!(requests[1].prompt, build_nutrition_prompt(" Pizza, salad"));
        assert!(requests[1].images.is_empty());
    }

    #[tokio::test]
    async fn test_single_block_gives_one_record() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply("Banana")
                .reply("* Food Item: Banana\n* Calories: 105\n* Carbohydrates: 27g (Sugars: 14g)"),
        );
        let records = analyzer(client).analyze_image(&image()).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Carbohydrates"], "27g (Sugars: 14g)");
    }

    #[tokio::test]
    async fn test_empty_image_makes_no_calls() {
        let client = Arc::new(ScriptedClient::new());
        let err = analyzer(client.clone())
            .analyze_image(&ImagePayload::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::MissingInput));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_vision_response_stops_pipeline() {
        let client = Arc::new(ScriptedClient::new().reply("").reply("Calories: 100"));
        let err = analyzer(client.clone()).analyze_image(&image()).await.unwrap_err();

        match err {
            AnalysisError::UpstreamEmptyResponse { model } => assert_eq!(model, "llava:7b"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_vision_text_stops_pipeline() {
        let client = Arc::new(ScriptedClient::new().reply_without_text());
        let err = analyzer(client.clone()).analyze_image(&image()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::UpstreamEmptyResponse { .. }));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_nutrition_response() {
        let client = Arc::new(ScriptedClient::new().reply("Apple").reply("   \n"));
        let err = analyzer(client.clone()).analyze_image(&image()).await.unwrap_err();

        match err {
            AnalysisError::UpstreamEmptyResponse { model } => assert_eq!(model, "mistral"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let client = Arc::new(ScriptedClient::new().fail("connection refused").reply("Apple"));
        let err = analyzer(client.clone()).analyze_image(&image()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::UpstreamTransportFailure { .. }));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_nutrition_text_gives_empty_set() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply("Soup")
                .reply("I'm sorry, I can't help with that."),
        );
        let records = analyzer(client).analyze_image(&image()).await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_format_example_values_do_not_leak() {
        let client = Arc::new(
            ScriptedClient::new()
                .reply("Grilled chicken")
                .reply("* Food Item: Grilled chicken\n* Calories: 165\n* Protein: 31g"),
        );
        let records = analyzer(client).analyze_image(&image()).await.unwrap();

        assert!(NUTRITION_FORMAT_EXAMPLE.contains("Cheescake"));
        for record in &records {
            for value in record.values() {
                assert!(!value.contains("Cheescake"));
                assert!(!value.contains("370-400"));
            }
        }
    }
}
