use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::AnalysisError;
use crate::handlers::FoodAnalyzer;
use crate::models::{AnalysisResponse, ErrorResponse, ImagePayload};

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

pub struct AppState {
    pub analyzer: Arc<FoodAnalyzer>,
}

pub fn create_router(analyzer: Arc<FoodAnalyzer>, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState { analyzer });

    Router::new()
        .route("/", get(root_handler))
        .route("/api/analyze-food", post(analyze_food_handler))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

async fn analyze_food_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AnalysisError> {
    let multipart = multipart.map_err(|e| {
        log::warn!("⚠️ Request is not a multipart upload: {}", e);
        AnalysisError::MissingInput
    })?;

    let image = read_image_field(multipart).await?.ok_or_else(|| {
        log::warn!("⚠️ No '{}' field in upload", IMAGE_FIELD);
        AnalysisError::MissingInput
    })?;

    match state.analyzer.analyze_image(&image).await {
        Ok(records) => Ok(Json(AnalysisResponse {
            nutrition_data: records,
        })),
        Err(e) => {
            log::error!("❌ Error analyzing image: {}", e);
            Err(e)
        }
    }
}

/// Returns the first `image` file part's bytes, skipping any other fields.
/// A body that cannot be read (including one over the size limit) is an
/// error, not a missing image.
async fn read_image_field(mut multipart: Multipart) -> Result<Option<ImagePayload>, AnalysisError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                log::error!("❌ Failed to read multipart upload: {}", e);
                return Err(AnalysisError::UnreadableUpload(e));
            }
        };

        // Plain text fields named `image` are not uploads.
        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            continue;
        }

        log::info!(
            "📥 Received upload: file={:?}, content_type={:?}",
            field.file_name(),
            field.content_type()
        );

        let bytes = field.bytes().await.map_err(|e| {
            log::error!("❌ Failed to read image field: {}", e);
            AnalysisError::UnreadableUpload(e)
        })?;

        return Ok(Some(ImagePayload::new(bytes.to_vec())));
    }
}

async fn root_handler() -> &'static str {
    "Food Nutrition Analyzer - POST an image to /api/analyze-food"
}

async fn health_check() -> &'static str {
    "OK"
}
