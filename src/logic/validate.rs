use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, AppResult};
use crate::model::{MatchDraft, MatchUpdate, NewCard, NewGoal, NewMatch};

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Shape checks for the create and partial-update contracts. Pure: nothing
/// here touches the store.
pub struct RecordValidator;

impl RecordValidator {
    pub fn validate_new_match(new_match: NewMatch) -> AppResult<MatchDraft> {
        let fecha = Self::parse_date("fecha", &new_match.fecha)?;
        let hora = Self::parse_time("hora", &new_match.hora)?;
        let goles_local = new_match.goles_local.unwrap_or(0);
        let goles_visitante = new_match.goles_visitante.unwrap_or(0);
        Self::non_negative("goles_local", goles_local)?;
        Self::non_negative("goles_visitante", goles_visitante)?;

        Ok(MatchDraft {
            temporada_id: new_match.temporada_id,
            fecha,
            hora,
            estadio_id: new_match.estadio_id,
            equipo_local: new_match.equipo_local,
            equipo_visitante: new_match.equipo_visitante,
            goles_local,
            goles_visitante,
        })
    }

    /// Emptiness is left to the store, which reports a missing match first.
    pub fn validate_match_update(update: &MatchUpdate) -> AppResult<()> {
        if let Some(goles_local) = update.goles_local {
            Self::non_negative("goles_local", goles_local)?;
        }
        if let Some(goles_visitante) = update.goles_visitante {
            Self::non_negative("goles_visitante", goles_visitante)?;
        }
        Ok(())
    }

    pub fn validate_new_goal(goal: NewGoal) -> AppResult<NewGoal> {
        Self::non_negative("minuto", goal.minuto)?;
        Ok(goal)
    }

    /// `tipo` is stored exactly as sent; only blank values are rejected.
    pub fn validate_new_card(card: NewCard) -> AppResult<NewCard> {
        Self::non_negative("minuto", card.minuto)?;
        if card.tipo.trim().is_empty() {
            return Err(AppError::malformed("tipo must not be empty"));
        }
        Ok(card)
    }

    fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
            AppError::malformed(format!(
                "{} must be an ISO-8601 date (YYYY-MM-DD), got '{}': {}",
                field, raw, e
            ))
        })
    }

    fn parse_time(field: &str, raw: &str) -> AppResult<NaiveTime> {
        let raw_trimmed = raw.trim();
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(raw_trimmed, format).ok())
            .ok_or_else(|| {
                AppError::malformed(format!(
                    "{} must be an ISO-8601 time (HH:MM[:SS]), got '{}'",
                    field, raw
                ))
            })
    }

    fn non_negative(field: &str, value: i32) -> AppResult<()> {
        if value < 0 {
            return Err(AppError::malformed(format!(
                "{} must be non-negative, got {}",
                field, value
            )));
        }
        Ok(())
    }
}
