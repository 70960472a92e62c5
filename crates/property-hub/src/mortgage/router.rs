use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::amortization::LoanProfile;
use super::applications::{
    ApplicationId, ApplicationStatus, MortgageApplicationRepository, MortgageApplicationRequest,
    UserId,
};
use super::catalog::MortgageProductSource;
use super::lenders::nigerian_mortgage_banks;
use super::matching::BorrowerProfile;
use super::service::{MortgageService, MortgageServiceError};
use crate::repository::RepositoryError;

#[derive(Debug, Deserialize)]
pub(crate) struct ApplicationQuery {
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: ApplicationStatus,
}

/// Router builder exposing the calculator, matcher, and application endpoints.
pub fn mortgage_router<P, R>(service: Arc<MortgageService<P, R>>) -> Router
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/mortgage/calculate", post(calculate_handler))
        .route("/api/v1/mortgage/lenders", get(lenders_handler))
        .route("/api/v1/mortgage/match", post(match_handler::<P, R>))
        .route(
            "/api/v1/mortgage/applications",
            post(apply_handler::<P, R>).get(user_applications_handler::<P, R>),
        )
        .route(
            "/api/v1/mortgage/applications/:application_id",
            get(application_handler::<P, R>),
        )
        .route(
            "/api/v1/mortgage/applications/:application_id/status",
            put(status_handler::<P, R>),
        )
        .with_state(service)
}

pub(crate) async fn calculate_handler(Json(profile): Json<LoanProfile>) -> Response {
    match profile.amortize() {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn lenders_handler() -> Response {
    (StatusCode::OK, Json(nigerian_mortgage_banks())).into_response()
}

pub(crate) async fn match_handler<P, R>(
    State(service): State<Arc<MortgageService<P, R>>>,
    Json(borrower): Json<BorrowerProfile>,
) -> Response
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    match service.match_products(&borrower) {
        Ok(matches) => (StatusCode::OK, Json(matches)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_handler<P, R>(
    State(service): State<Arc<MortgageService<P, R>>>,
    Json(request): Json<MortgageApplicationRequest>,
) -> Response
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    match service.apply(request) {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn user_applications_handler<P, R>(
    State(service): State<Arc<MortgageService<P, R>>>,
    Query(query): Query<ApplicationQuery>,
) -> Response
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    match service.applications_for_user(&UserId(query.user_id)) {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn application_handler<P, R>(
    State(service): State<Arc<MortgageService<P, R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<P, R>(
    State(service): State<Arc<MortgageService<P, R>>>,
    Path(application_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    match service.update_status(&ApplicationId(application_id), update.status) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MortgageServiceError) -> Response {
    let status = match &error {
        MortgageServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MortgageServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MortgageServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MortgageServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
