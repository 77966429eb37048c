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
use crate::model::{Deleted, Id, Pagination, Participation};
use crate::store::traits::Store;

pub async fn create_participation<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<RequestJson<Participation>, JsonRejection>,
) -> Result<(StatusCode, Json<Participation>), ApiError> {
    let participation = json_body(payload)?;

    let created = store
        .create_participation(participation)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_participation<S: Store>(
    State(store): State<AppState<S>>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Participation>>, ApiError> {
    let page = pagination(query)?;
    let rows = store.list_participation(page).await.map_err(error_response)?;
    Ok(Json(rows))
}

pub async fn get_participation<S: Store>(
    State(store): State<AppState<S>>,
    Path((partido_id, jugador_id)): Path<(Id, Id)>,
) -> Result<Json<Participation>, ApiError> {
    let found = store
        .get_participation(partido_id, jugador_id)
        .await
        .map_err(error_response)?;
    Ok(Json(found))
}

pub async fn delete_participation<S: Store>(
    State(store): State<AppState<S>>,
    Path((partido_id, jugador_id)): Path<(Id, Id)>,
) -> Result<Json<Deleted>, ApiError> {
    store
        .delete_participation(partido_id, jugador_id)
        .await
        .map_err(error_response)?;
    Ok(Json(Deleted::confirmed()))
}
