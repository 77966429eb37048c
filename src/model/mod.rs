pub mod card;
pub mod common;
pub mod goal;
pub mod matches;
pub mod participation;

pub use card::*;
pub use common::*;
pub use goal::*;
pub use matches::*;
pub use participation::*;
