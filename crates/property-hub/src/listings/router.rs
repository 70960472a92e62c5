use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{NewProperty, PropertyId, PropertyUpdate};
use super::filters::{FilterUpdate, SearchFilters};
use super::repository::PropertyRepository;
use super::service::{ListingService, ListingServiceError, DEFAULT_FEATURED_LIMIT};
use crate::rent::{predict_fair_rent, PropertyAttributes};
use crate::repository::RepositoryError;

#[derive(Debug, Deserialize)]
pub(crate) struct FeaturedQuery {
    #[serde(default)]
    limit: Option<usize>,
}

/// Router builder exposing listing CRUD, search, and rent estimates.
pub fn listing_router<R>(service: Arc<ListingService<R>>) -> Router
where
    R: PropertyRepository + 'static,
{
    Router::new()
        .route("/api/v1/rent/predict", post(predict_handler))
        .route(
            "/api/v1/properties",
            get(search_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/properties/featured", get(featured_handler::<R>))
        .route(
            "/api/v1/properties/:property_id",
            get(property_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/properties/:property_id/rent-prediction",
            get(rent_prediction_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn predict_handler(Json(attributes): Json<PropertyAttributes>) -> Response {
    (StatusCode::OK, Json(predict_fair_rent(&attributes))).into_response()
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Query(update): Query<FilterUpdate>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let mut filters = SearchFilters::default();
    filters.merge(update);

    match service.search(&filters) {
        Ok(properties) => (StatusCode::OK, Json(properties)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Json(listing): Json<NewProperty>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.create(listing) {
        Ok(property) => (StatusCode::CREATED, Json(property)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn featured_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Query(query): Query<FeaturedQuery>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    match service.featured(limit) {
        Ok(properties) => (StatusCode::OK, Json(properties)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn property_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.get(&PropertyId(property_id)) {
        Ok(property) => (StatusCode::OK, Json(property)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(property_id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.update(&PropertyId(property_id), update) {
        Ok(property) => (StatusCode::OK, Json(property)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.delete(&PropertyId(property_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rent_prediction_handler<R>(
    State(service): State<Arc<ListingService<R>>>,
    Path(property_id): Path<String>,
) -> Response
where
    R: PropertyRepository + 'static,
{
    match service.rent_prediction(&PropertyId(property_id)) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ListingServiceError) -> Response {
    let status = match &error {
        ListingServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ListingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ListingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
