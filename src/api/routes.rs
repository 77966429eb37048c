use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::{card_handlers, goal_handlers, handlers, participation_handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check::<S>))
        // Matches
        .route("/matches", post(handlers::create_match::<S>))
        .route("/matches", get(handlers::list_matches::<S>))
        .route("/matches/:partido_id", get(handlers::get_match::<S>))
        .route("/matches/:partido_id", patch(handlers::update_match::<S>))
        .route("/matches/:partido_id", delete(handlers::delete_match::<S>))
        // Participation (composite identity)
        .route(
            "/participation",
            post(participation_handlers::create_participation::<S>),
        )
        .route(
            "/participation",
            get(participation_handlers::list_participation::<S>),
        )
        .route(
            "/participation/:partido_id/:jugador_id",
            get(participation_handlers::get_participation::<S>),
        )
        .route(
            "/participation/:partido_id/:jugador_id",
            delete(participation_handlers::delete_participation::<S>),
        )
        // Goals
        .route("/goals", post(goal_handlers::create_goal::<S>))
        .route("/goals", get(goal_handlers::list_goals::<S>))
        .route("/goals/:gol_id", get(goal_handlers::get_goal::<S>))
        .route("/goals/:gol_id", delete(goal_handlers::delete_goal::<S>))
        // Cards
        .route("/cards", post(card_handlers::create_card::<S>))
        .route("/cards", get(card_handlers::list_cards::<S>))
        .route("/cards/:amonest_id", get(card_handlers::get_card::<S>))
        .route("/cards/:amonest_id", delete(card_handlers::delete_card::<S>))
        .layer(CorsLayer::permissive())
}
