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
use crate::model::{Deleted, Goal, Id, NewGoal, Pagination};
use crate::store::traits::Store;

pub async fn create_goal<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<RequestJson<NewGoal>, JsonRejection>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let goal = RecordValidator::validate_new_goal(json_body(payload)?).map_err(error_response)?;

    let created = store.create_goal(goal).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_goals<S: Store>(
    State(store): State<AppState<S>>,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let page = pagination(query)?;
    let goals = store.list_goals(page).await.map_err(error_response)?;
    Ok(Json(goals))
}

pub async fn get_goal<S: Store>(
    State(store): State<AppState<S>>,
    Path(gol_id): Path<Id>,
) -> Result<Json<Goal>, ApiError> {
    let found = store.get_goal(gol_id).await.map_err(error_response)?;
    Ok(Json(found))
}

pub async fn delete_goal<S: Store>(
    State(store): State<AppState<S>>,
    Path(gol_id): Path<Id>,
) -> Result<Json<Deleted>, ApiError> {
    store.delete_goal(gol_id).await.map_err(error_response)?;
    Ok(Json(Deleted::confirmed()))
}
