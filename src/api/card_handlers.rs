use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};

use crate::api::handlers::{error_response, json_body, pagination, ApiError, AppState};
use crate::logic::RecordValidator;
use crate::model::{Card, Deleted, Id, NewCard, Pagination};
use crate::store::traits::Store;

pub async fn create_card<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<RequestJson<NewCard>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let card = RecordValidator::validate_new_card(json_body(payload)?).map_err(error_response)?;

    let created = store.create_card(card).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_cards<S: Store>(
    State(store): State<AppState<S>>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let page = pagination(query)?;
    let cards = store.list_cards(page).await.map_err(error_response)?;
    Ok(Json(cards))
}

pub async fn get_card<S: Store>(
    State(store): State<AppState<S>>,
    Path(amonest_id): Path<Id>,
) -> Result<Json<Card>, ApiError> {
    let found = store.get_card(amonest_id).await.map_err(error_response)?;
    Ok(Json(found))
}

pub async fn delete_card<S: Store>(
    State(store): State<AppState<S>>,
    Path(amonest_id): Path<Id>,
) -> Result<Json<Deleted>, ApiError> {
    store.delete_card(amonest_id).await.map_err(error_response)?;
    Ok(Json(Deleted::confirmed()))
}
