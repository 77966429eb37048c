use serde::{Deserialize, Serialize};

use crate::model::Id;

/// A player's participation in a match. The `(partido_id, jugador_id)`
/// pair is both the create contract and the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Participation {
    pub partido_id: Id,
    pub jugador_id: Id,
}
