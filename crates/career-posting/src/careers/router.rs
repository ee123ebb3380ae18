use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{OrganizationId, PostingSubmission};
use super::repository::{OrganizationDirectory, PostingRepository};
use super::service::{CareerPostingService, PostingServiceError};
use super::validation::ValidationError;

/// Router builder exposing the posting creation and capacity endpoints.
pub fn career_router<D, R>(service: Arc<CareerPostingService<D, R>>) -> Router
where
    D: OrganizationDirectory + 'static,
    R: PostingRepository + 'static,
{
    Router::new()
        .route("/api/v1/careers", post(create_handler::<D, R>))
        .route(
            "/api/v1/organizations/:organization_id/capacity",
            get(capacity_handler::<D, R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<D, R>(
    State(service): State<Arc<CareerPostingService<D, R>>>,
    axum::Json(submission): axum::Json<PostingSubmission>,
) -> Response
where
    D: OrganizationDirectory + 'static,
    R: PostingRepository + 'static,
{
    match service.create(submission) {
        Ok(posting) => (StatusCode::CREATED, axum::Json(posting)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn capacity_handler<D, R>(
    State(service): State<Arc<CareerPostingService<D, R>>>,
    Path(organization_id): Path<String>,
) -> Response
where
    D: OrganizationDirectory + 'static,
    R: PostingRepository + 'static,
{
    let id = OrganizationId::new(organization_id);
    match service.capacity(&id) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: PostingServiceError) -> Response {
    match err {
        PostingServiceError::Validation(validation) => {
            let payload = match &validation {
                ValidationError::MissingFields(fields) => json!({
                    "error": validation.to_string(),
                    "missing_fields": fields,
                }),
                ValidationError::SalaryRange { .. } => json!({
                    "error": validation.to_string(),
                }),
            };
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        PostingServiceError::NotFound(id) => {
            let payload = json!({
                "error": "organization not found",
                "organization_id": id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        PostingServiceError::CapacityExceeded { capacity, active } => {
            let payload = json!({
                "error": "Job posting limit reached. Upgrade your plan or purchase extra job slots to post more careers.",
                "capacity": capacity,
                "active": active,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        PostingServiceError::StorageUnavailable(detail) => {
            error!(%detail, "career posting storage unavailable");
            let payload = json!({
                "error": "storage unavailable",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
