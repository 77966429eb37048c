use serde::{Deserialize, Serialize};

use crate::model::Id;

/// Create contract for a disciplinary card. `tipo` is free text
/// (e.g. "amarilla", "roja").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub partido_id: Id,
    pub jugador_id: Id,
    pub minuto: i32,
    pub tipo: String,
}

impl NewCard {
    pub fn into_card(self, amonest_id: Id) -> Card {
        Card {
            amonest_id,
            partido_id: self.partido_id,
            jugador_id: self.jugador_id,
            minuto: self.minuto,
            tipo: self.tipo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    pub amonest_id: Id,
    pub partido_id: Id,
    pub jugador_id: Id,
    pub minuto: i32,
    pub tipo: String,
}
