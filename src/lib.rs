pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::routes;
pub use api::routes::create_router;

pub use error::{AppError, AppResult};
pub use logic::RecordValidator;

// Export all model types
pub use model::*;

// Export store types
pub use store::{CardStore, GoalStore, MatchStore, ParticipationStore, PostgresStore, Store};
