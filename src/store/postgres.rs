use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::model::{Card, Goal, Id, Match, MatchDraft, MatchUpdate, NewCard, NewGoal, Pagination, Participation};
use crate::store::schema;
use crate::store::traits::{CardStore, GoalStore, MatchStore, ParticipationStore, Store};

const MATCH_COLUMNS: &str = "partido_id, temporada_id, fecha, hora, estadio_id, equipo_local, equipo_visitante, goles_local, goles_visitante";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open the connection pool. The store lives until [`PostgresStore::close`].
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create missing tables and constraints in one transaction.
    pub async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start schema transaction")?;

        for statement in schema::bootstrap_statements() {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .context("Failed to apply schema statement")?;
        }

        tx.commit().await.context("Failed to commit schema")?;
        Ok(())
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl MatchStore for PostgresStore {
    async fn get_match(&self, partido_id: Id) -> AppResult<Match> {
        let sql = format!("SELECT {} FROM partido WHERE partido_id = $1", MATCH_COLUMNS);
        sqlx::query_as::<_, Match>(&sql)
            .bind(partido_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Match {}", partido_id)))
    }

    async fn list_matches(&self, page: Pagination) -> AppResult<Vec<Match>> {
        let sql = format!(
            "SELECT {} FROM partido ORDER BY partido_id LIMIT $1 OFFSET $2",
            MATCH_COLUMNS
        );
        let matches = sqlx::query_as::<_, Match>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(matches)
    }

    async fn create_match(&self, draft: MatchDraft) -> AppResult<Match> {
        let sql = format!(
            r#"
            INSERT INTO partido (temporada_id, fecha, hora, estadio_id, equipo_local, equipo_visitante, goles_local, goles_visitante)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            MATCH_COLUMNS
        );

        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Match>(&sql)
            .bind(draft.temporada_id)
            .bind(draft.fecha)
            .bind(draft.hora)
            .bind(draft.estadio_id)
            .bind(draft.equipo_local)
            .bind(draft.equipo_visitante)
            .bind(draft.goles_local)
            .bind(draft.goles_visitante)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn update_match(&self, partido_id: Id, update: MatchUpdate) -> AppResult<Match> {
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query("SELECT partido_id FROM partido WHERE partido_id = $1 FOR UPDATE")
            .bind(partido_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::not_found(format!("Match {}", partido_id)));
        }
        if update.is_empty() {
            return Err(AppError::NoFieldsProvided);
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE partido SET ");
        let mut first = true;

        if let Some(goles_local) = update.goles_local {
            push_set_prefix(&mut builder, &mut first);
            builder.push("goles_local = ").push_bind(goles_local);
        }

        if let Some(goles_visitante) = update.goles_visitante {
            push_set_prefix(&mut builder, &mut first);
            builder.push("goles_visitante = ").push_bind(goles_visitante);
        }

        builder
            .push(" WHERE partido_id = ")
            .push_bind(partido_id)
            .push(" RETURNING ")
            .push(MATCH_COLUMNS);

        let updated = builder
            .build_query_as::<Match>()
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_match(&self, partido_id: Id) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM partido WHERE partido_id = $1")
            .bind(partido_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Match {}", partido_id)));
        }
        tx.commit().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ParticipationStore for PostgresStore {
    async fn get_participation(&self, partido_id: Id, jugador_id: Id) -> AppResult<Participation> {
        sqlx::query_as::<_, Participation>(
            "SELECT partido_id, jugador_id FROM participa WHERE partido_id = $1 AND jugador_id = $2",
        )
        .bind(partido_id)
        .bind(jugador_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| participation_not_found(partido_id, jugador_id))
    }

    async fn list_participation(&self, page: Pagination) -> AppResult<Vec<Participation>> {
        let rows = sqlx::query_as::<_, Participation>(
            "SELECT partido_id, jugador_id FROM participa ORDER BY partido_id, jugador_id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create_participation(&self, participation: Participation) -> AppResult<Participation> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Participation>(
            r#"
            INSERT INTO participa (partido_id, jugador_id)
            VALUES ($1, $2)
            RETURNING partido_id, jugador_id
            "#,
        )
        .bind(participation.partido_id)
        .bind(participation.jugador_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn delete_participation(&self, partido_id: Id, jugador_id: Id) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM participa WHERE partido_id = $1 AND jugador_id = $2")
            .bind(partido_id)
            .bind(jugador_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(participation_not_found(partido_id, jugador_id));
        }
        tx.commit().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl GoalStore for PostgresStore {
    async fn get_goal(&self, gol_id: Id) -> AppResult<Goal> {
        sqlx::query_as::<_, Goal>(
            "SELECT gol_id, partido_id, jugador_id, minuto FROM gol WHERE gol_id = $1",
        )
        .bind(gol_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Goal {}", gol_id)))
    }

    async fn list_goals(&self, page: Pagination) -> AppResult<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            "SELECT gol_id, partido_id, jugador_id, minuto FROM gol ORDER BY gol_id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    async fn create_goal(&self, goal: NewGoal) -> AppResult<Goal> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO gol (partido_id, jugador_id, minuto)
            VALUES ($1, $2, $3)
            RETURNING gol_id, partido_id, jugador_id, minuto
            "#,
        )
        .bind(goal.partido_id)
        .bind(goal.jugador_id)
        .bind(goal.minuto)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn delete_goal(&self, gol_id: Id) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM gol WHERE gol_id = $1")
            .bind(gol_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Goal {}", gol_id)));
        }
        tx.commit().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl CardStore for PostgresStore {
    async fn get_card(&self, amonest_id: Id) -> AppResult<Card> {
        sqlx::query_as::<_, Card>(
            "SELECT amonest_id, partido_id, jugador_id, minuto, tipo FROM amonestacion WHERE amonest_id = $1",
        )
        .bind(amonest_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Card {}", amonest_id)))
    }

    async fn list_cards(&self, page: Pagination) -> AppResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            "SELECT amonest_id, partido_id, jugador_id, minuto, tipo FROM amonestacion ORDER BY amonest_id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    async fn create_card(&self, card: NewCard) -> AppResult<Card> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO amonestacion (partido_id, jugador_id, minuto, tipo)
            VALUES ($1, $2, $3, $4)
            RETURNING amonest_id, partido_id, jugador_id, minuto, tipo
            "#,
        )
        .bind(card.partido_id)
        .bind(card.jugador_id)
        .bind(card.minuto)
        .bind(card.tipo)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn delete_card(&self, amonest_id: Id) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM amonestacion WHERE amonest_id = $1")
            .bind(amonest_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Card {}", amonest_id)));
        }
        tx.commit().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn push_set_prefix(builder: &mut QueryBuilder<'_, Postgres>, first: &mut bool) {
    if !*first {
        builder.push(", ");
    }
    *first = false;
}

fn participation_not_found(partido_id: Id, jugador_id: Id) -> AppError {
    AppError::not_found(format!(
        "Participation of player {} in match {}",
        jugador_id, partido_id
    ))
}
