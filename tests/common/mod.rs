#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use futbol_db_rust::{
    create_router, AppError, AppResult, Card, CardStore, Goal, GoalStore, Id, Match, MatchDraft,
    MatchStore, MatchUpdate, NewCard, NewGoal, Pagination, Participation, ParticipationStore,
    Store,
};
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

/// Reference rows every test store starts with.
pub const SEASON: Id = 1;
pub const STADIUM: Id = 2;
pub const HOME_TEAM: Id = 3;
pub const AWAY_TEAM: Id = 4;
pub const PLAYERS: [Id; 3] = [10, 11, 12];

#[derive(Default)]
struct Tables {
    seasons: HashSet<Id>,
    stadiums: HashSet<Id>,
    teams: HashSet<Id>,
    players: HashSet<Id>,
    matches: BTreeMap<Id, Match>,
    participation: BTreeMap<(Id, Id), Participation>,
    goals: BTreeMap<Id, Goal>,
    cards: BTreeMap<Id, Card>,
    next_match_id: Id,
    next_goal_id: Id,
    next_card_id: Id,
}

impl Tables {
    fn require(set: &HashSet<Id>, id: Id, what: &str) -> AppResult<()> {
        if set.contains(&id) {
            Ok(())
        } else {
            Err(AppError::ReferentialIntegrityViolation(format!(
                "{} {} does not exist",
                what, id
            )))
        }
    }

    fn require_match_and_player(&self, partido_id: Id, jugador_id: Id) -> AppResult<()> {
        if !self.matches.contains_key(&partido_id) {
            return Err(AppError::ReferentialIntegrityViolation(format!(
                "partido {} does not exist",
                partido_id
            )));
        }
        Self::require(&self.players, jugador_id, "jugador")
    }
}

fn window<T: Clone>(rows: impl Iterator<Item = T>, page: Pagination) -> Vec<T> {
    rows.skip(page.skip as usize).take(page.limit as usize).collect()
}

/// In-process stand-in for Postgres: identity columns, FK RESTRICT on
/// references, CASCADE from matches, and unique participation pairs.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let tables = Tables {
            seasons: HashSet::from([SEASON]),
            stadiums: HashSet::from([STADIUM]),
            teams: HashSet::from([HOME_TEAM, AWAY_TEAM]),
            players: PLAYERS.into_iter().collect(),
            next_match_id: 1,
            next_goal_id: 1,
            next_card_id: 1,
            ..Tables::default()
        };
        Self {
            tables: Mutex::new(tables),
            offline: Mutex::new(false),
        }
    }

    /// Every later call fails the way a lost connection does.
    pub fn go_offline(&self) {
        *self.offline.lock() = true;
    }

    /// Emulates `DELETE FROM equipo` against the RESTRICT constraint.
    pub fn delete_team(&self, equipo_id: Id) -> AppResult<()> {
        let mut tables = self.tables.lock();
        let referenced = tables
            .matches
            .values()
            .any(|m| m.equipo_local == equipo_id || m.equipo_visitante == equipo_id);
        if referenced {
            return Err(AppError::ReferentialIntegrityViolation(format!(
                "equipo {} is still referenced by partido",
                equipo_id
            )));
        }
        tables.teams.remove(&equipo_id);
        Ok(())
    }

    pub fn goal_count(&self) -> usize {
        self.tables.lock().goals.len()
    }

    pub fn participation_count(&self) -> usize {
        self.tables.lock().participation.len()
    }

    fn check_online(&self) -> AppResult<()> {
        if *self.offline.lock() {
            return Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MatchStore for MemoryStore {
    async fn get_match(&self, partido_id: Id) -> AppResult<Match> {
        self.check_online()?;
        self.tables
            .lock()
            .matches
            .get(&partido_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Match {}", partido_id)))
    }

    async fn list_matches(&self, page: Pagination) -> AppResult<Vec<Match>> {
        self.check_online()?;
        Ok(window(self.tables.lock().matches.values().cloned(), page))
    }

    async fn create_match(&self, draft: MatchDraft) -> AppResult<Match> {
        self.check_online()?;
        let mut tables = self.tables.lock();
        Tables::require(&tables.seasons, draft.temporada_id, "temporada")?;
        Tables::require(&tables.stadiums, draft.estadio_id, "estadio")?;
        Tables::require(&tables.teams, draft.equipo_local, "equipo")?;
        Tables::require(&tables.teams, draft.equipo_visitante, "equipo")?;

        let id = tables.next_match_id;
        tables.next_match_id += 1;
        let created = draft.into_match(id);
        tables.matches.insert(id, created.clone());
        Ok(created)
    }

    async fn update_match(&self, partido_id: Id, update: MatchUpdate) -> AppResult<Match> {
        self.check_online()?;
        let mut tables = self.tables.lock();
        let current = tables
            .matches
            .get_mut(&partido_id)
            .ok_or_else(|| AppError::not_found(format!("Match {}", partido_id)))?;
        if update.is_empty() {
            return Err(AppError::NoFieldsProvided);
        }
        if let Some(goles_local) = update.goles_local {
            current.goles_local = goles_local;
        }
        if let Some(goles_visitante) = update.goles_visitante {
            current.goles_visitante = goles_visitante;
        }
        Ok(current.clone())
    }

    async fn delete_match(&self, partido_id: Id) -> AppResult<()> {
        self.check_online()?;
        let mut tables = self.tables.lock();
        if tables.matches.remove(&partido_id).is_none() {
            return Err(AppError::not_found(format!("Match {}", partido_id)));
        }
        tables.participation.retain(|(m, _), _| *m != partido_id);
        tables.goals.retain(|_, g| g.partido_id != partido_id);
        tables.cards.retain(|_, c| c.partido_id != partido_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ParticipationStore for MemoryStore {
    async fn get_participation(&self, partido_id: Id, jugador_id: Id) -> AppResult<Participation> {
        self.check_online()?;
        self.tables
            .lock()
            .participation
            .get(&(partido_id, jugador_id))
            .copied()
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Participation of player {} in match {}",
                    jugador_id, partido_id
                ))
            })
    }

    async fn list_participation(&self, page: Pagination) -> AppResult<Vec<Participation>> {
        self.check_online()?;
        Ok(window(self.tables.lock().participation.values().copied(), page))
    }

    async fn create_participation(&self, participation: Participation) -> AppResult<Participation> {
        self.check_online()?;
        let mut tables = self.tables.lock();
        tables.require_match_and_player(participation.partido_id, participation.jugador_id)?;

        let key = (participation.partido_id, participation.jugador_id);
        if tables.participation.contains_key(&key) {
            return Err(AppError::DuplicateKey(format!(
                "participa ({}, {}) already exists",
                key.0, key.1
            )));
        }
        tables.participation.insert(key, participation);
        Ok(participation)
    }

    async fn delete_participation(&self, partido_id: Id, jugador_id: Id) -> AppResult<()> {
        self.check_online()?;
        match self.tables.lock().participation.remove(&(partido_id, jugador_id)) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "Participation of player {} in match {}",
                jugador_id, partido_id
            ))),
        }
    }
}

#[async_trait::async_trait]
impl GoalStore for MemoryStore {
    async fn get_goal(&self, gol_id: Id) -> AppResult<Goal> {
        self.check_online()?;
        self.tables
            .lock()
            .goals
            .get(&gol_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Goal {}", gol_id)))
    }

    async fn list_goals(&self, page: Pagination) -> AppResult<Vec<Goal>> {
        self.check_online()?;
        Ok(window(self.tables.lock().goals.values().cloned(), page))
    }

    async fn create_goal(&self, goal: NewGoal) -> AppResult<Goal> {
        self.check_online()?;
        let mut tables = self.tables.lock();
        tables.require_match_and_player(goal.partido_id, goal.jugador_id)?;

        let id = tables.next_goal_id;
        tables.next_goal_id += 1;
        let created = goal.into_goal(id);
        tables.goals.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_goal(&self, gol_id: Id) -> AppResult<()> {
        self.check_online()?;
        match self.tables.lock().goals.remove(&gol_id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Goal {}", gol_id))),
        }
    }
}

#[async_trait::async_trait]
impl CardStore for MemoryStore {
    async fn get_card(&self, amonest_id: Id) -> AppResult<Card> {
        self.check_online()?;
        self.tables
            .lock()
            .cards
            .get(&amonest_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Card {}", amonest_id)))
    }

    async fn list_cards(&self, page: Pagination) -> AppResult<Vec<Card>> {
        self.check_online()?;
        Ok(window(self.tables.lock().cards.values().cloned(), page))
    }

    async fn create_card(&self, card: NewCard) -> AppResult<Card> {
        self.check_online()?;
        let mut tables = self.tables.lock();
        tables.require_match_and_player(card.partido_id, card.jugador_id)?;

        let id = tables.next_card_id;
        tables.next_card_id += 1;
        let created = card.into_card(id);
        tables.cards.insert(id, created.clone());
        Ok(created)
    }

    async fn delete_card(&self, amonest_id: Id) -> AppResult<()> {
        self.check_online()?;
        match self.tables.lock().cards.remove(&amonest_id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Card {}", amonest_id))),
        }
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.check_online()
    }
}

/// Router wired to a fresh [`MemoryStore`]; the store handle is returned for
/// direct inspection.
pub fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let router = create_router().with_state(store.clone());
    (router, store)
}

pub async fn send_json(app: &Router, method: Method, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");
    send(app, request).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, request).await
}

pub async fn send_empty(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    // Extractor rejections (e.g. bad path segments) answer in plain text.
    let json = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    (status, json)
}

pub fn sample_match() -> Value {
    serde_json::json!({
        "temporada_id": SEASON,
        "fecha": "2024-05-01",
        "hora": "18:30:00",
        "estadio_id": STADIUM,
        "equipo_local": HOME_TEAM,
        "equipo_visitante": AWAY_TEAM
    })
}

/// Creates a match through the API and returns its generated id.
pub async fn create_match(app: &Router) -> Id {
    let (status, body) = send_json(app, Method::POST, "/matches", sample_match()).await;
    assert_eq!(status, StatusCode::CREATED, "match creation failed: {}", body);
    body["partido_id"].as_i64().expect("created match should have an id")
}
