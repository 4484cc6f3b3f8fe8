use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::ParameterSet;
use super::recommend::{TreatmentOption, TREATMENT_GUIDE};
use super::report::{AssessmentRecord, ImportanceEntry};
use super::service::{AssessmentError, AssessmentService};

/// Router builder exposing the assessment pipeline over HTTP.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/water/assessments", post(assess_handler))
        .route("/api/v1/water/treatments", get(treatments_handler))
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct AssessmentResponse {
    #[serde(flatten)]
    record: AssessmentRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    importance_ranking: Vec<ImportanceEntry>,
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<AssessmentService>>,
    axum::Json(parameters): axum::Json<ParameterSet>,
) -> Response {
    match service.assess(parameters) {
        Ok(record) => {
            let response = AssessmentResponse {
                record,
                importance_ranking: service.importance_ranking(),
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error @ (AssessmentError::Schema(_) | AssessmentError::Validation(_))) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn treatments_handler() -> axum::Json<&'static [TreatmentOption]> {
    axum::Json(&TREATMENT_GUIDE)
}
