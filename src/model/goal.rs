use serde::{Deserialize, Serialize};

use crate::model::Id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGoal {
    pub partido_id: Id,
    pub jugador_id: Id,
    pub minuto: i32,
}

impl NewGoal {
    pub fn into_goal(self, gol_id: Id) -> Goal {
        Goal {
            gol_id,
            partido_id: self.partido_id,
            jugador_id: self.jugador_id,
            minuto: self.minuto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Goal {
    pub gol_id: Id,
    pub partido_id: Id,
    pub jugador_id: Id,
    pub minuto: i32,
}
