use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::ClassifierService;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10MB

const MODEL_MISSING: &str = "Model not loaded or labels missing.";

/// Shared application state. `classifier` is `None` when startup loading
/// failed; the service then answers every prediction with an error body.
pub struct AppState {
    pub classifier: Option<ClassifierService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness message, independent of model load state.
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Fashion API is running!" }))
}

/// `POST /predict` — multipart form with an image under the `file` field.
/// Every outcome is a 200 with either the prediction or an `error` field in
/// the body.
async fn predict(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    let Some(classifier) = state.classifier.as_ref() else {
        return Json(json!({ "error": MODEL_MISSING }));
    };

    let mut image_bytes = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    match field.bytes().await {
                        Ok(bytes) => {
                            image_bytes = Some(bytes);
                            break;
                        }
                        Err(e) => {
                            return Json(json!({ "error": format!("Failed to read upload: {e}") }));
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return Json(json!({ "error": format!("Invalid multipart request: {e}") }));
            }
        }
    }
    let Some(image_bytes) = image_bytes else {
        return Json(json!({ "error": "No file uploaded" }));
    };

    info!(bytes = image_bytes.len(), "received image");
    match classifier.classify(&image_bytes).await {
        Ok(prediction) => Json(json!(prediction)),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}
