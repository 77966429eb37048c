use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::model::Id;

/// Create contract for a match. `fecha` and `hora` travel as ISO-8601 text
/// and are parsed during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub temporada_id: Id,
    pub fecha: String,
    pub hora: String,
    pub estadio_id: Id,
    pub equipo_local: Id,
    pub equipo_visitante: Id,
    #[serde(default)]
    pub goles_local: Option<i32>,
    #[serde(default)]
    pub goles_visitante: Option<i32>,
}

/// A validated [`NewMatch`], ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDraft {
    pub temporada_id: Id,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estadio_id: Id,
    pub equipo_local: Id,
    pub equipo_visitante: Id,
    pub goles_local: i32,
    pub goles_visitante: i32,
}

impl MatchDraft {
    pub fn into_match(self, partido_id: Id) -> Match {
        Match {
            partido_id,
            temporada_id: self.temporada_id,
            fecha: self.fecha,
            hora: self.hora,
            estadio_id: self.estadio_id,
            equipo_local: self.equipo_local,
            equipo_visitante: self.equipo_visitante,
            goles_local: self.goles_local,
            goles_visitante: self.goles_visitante,
        }
    }
}

/// Persisted match row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub partido_id: Id,
    pub temporada_id: Id,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    pub estadio_id: Id,
    pub equipo_local: Id,
    pub equipo_visitante: Id,
    pub goles_local: i32,
    pub goles_visitante: i32,
}

/// Partial update of a match score. Only supplied fields are applied;
/// an explicit `null` counts as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goles_local: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goles_visitante: Option<i32>,
}

impl MatchUpdate {
    pub fn is_empty(&self) -> bool {
        self.goles_local.is_none() && self.goles_visitante.is_none()
    }
}
