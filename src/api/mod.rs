pub mod card_handlers;
pub mod goal_handlers;
pub mod handlers;
pub mod participation_handlers;
pub mod routes;

pub use handlers::{error_response, status_for, ApiError, AppState, ErrorResponse, HealthResponse};
pub use routes::*;
