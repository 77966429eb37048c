pub mod postgres;
pub mod schema;
pub mod traits;

pub use postgres::*;
pub use traits::*;
