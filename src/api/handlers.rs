use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::logic::RecordValidator;
use crate::model::{Deleted, Id, Match, MatchUpdate, NewMatch, Pagination};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::MalformedInput(_) | AppError::NoFieldsProvided => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::ReferentialIntegrityViolation(_) | AppError::DuplicateKey(_) => {
            StatusCode::CONFLICT
        }
        AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Translate a repository or validation failure into its HTTP response.
pub fn error_response(err: AppError) -> ApiError {
    let status = status_for(&err);
    if err.is_client_error() {
        log::debug!("request rejected ({}): {}", status, err);
    } else {
        log::error!("store failure ({}): {}", status, err);
    }
    (status, Json(ErrorResponse::new(&err.to_string())))
}

/// Unwrap a JSON body, reporting shape errors as malformed input.
pub(crate) fn json_body<T>(payload: Result<RequestJson<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(RequestJson(value)) => Ok(value),
        Err(rejection) => Err(error_response(AppError::malformed(rejection.body_text()))),
    }
}

pub(crate) fn pagination(query: Result<Query<Pagination>, QueryRejection>) -> Result<Pagination, ApiError> {
    match query {
        Ok(Query(page)) => Ok(page),
        Err(rejection) => Err(error_response(AppError::malformed(rejection.body_text()))),
    }
}

pub async fn health_check<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match store.ping().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp,
        })),
        Err(e) => {
            log::warn!("health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    timestamp,
                }),
            ))
        }
    }
}

// Matches

pub async fn create_match<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<RequestJson<NewMatch>, JsonRejection>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let new_match = json_body(payload)?;
    let draft = RecordValidator::validate_new_match(new_match).map_err(error_response)?;

    let created = store.create_match(draft).await.map_err(error_response)?;
    log::info!("created match {}", created.partido_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_matches<S: Store>(
    State(store): State<AppState<S>>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Match>>, ApiError> {
    let page = pagination(query)?;
    let matches = store.list_matches(page).await.map_err(error_response)?;
    Ok(Json(matches))
}

pub async fn get_match<S: Store>(
    State(store): State<AppState<S>>,
    Path(partido_id): Path<Id>,
) -> Result<Json<Match>, ApiError> {
    let found = store.get_match(partido_id).await.map_err(error_response)?;
    Ok(Json(found))
}

pub async fn update_match<S: Store>(
    State(store): State<AppState<S>>,
    Path(partido_id): Path<Id>,
    payload: Result<RequestJson<MatchUpdate>, JsonRejection>,
) -> Result<Json<Match>, ApiError> {
    let update = json_body(payload)?;
    RecordValidator::validate_match_update(&update).map_err(error_response)?;

    let updated = store
        .update_match(partido_id, update)
        .await
        .map_err(error_response)?;
    Ok(Json(updated))
}

pub async fn delete_match<S: Store>(
    State(store): State<AppState<S>>,
    Path(partido_id): Path<Id>,
) -> Result<Json<Deleted>, ApiError> {
    store.delete_match(partido_id).await.map_err(error_response)?;
    log::info!("deleted match {}", partido_id);
    Ok(Json(Deleted::confirmed()))
}
