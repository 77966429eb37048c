use crate::error::AppResult;
use crate::model::{Card, Goal, Id, Match, MatchDraft, MatchUpdate, NewCard, NewGoal, Pagination, Participation};

#[async_trait::async_trait]
pub trait MatchStore: Send + Sync {
    async fn get_match(&self, partido_id: Id) -> AppResult<Match>;
    async fn list_matches(&self, page: Pagination) -> AppResult<Vec<Match>>;
    async fn create_match(&self, draft: MatchDraft) -> AppResult<Match>;
    /// Applies only the supplied fields; `NotFound` wins over `NoFieldsProvided`.
    async fn update_match(&self, partido_id: Id, update: MatchUpdate) -> AppResult<Match>;
    /// Removes the match and, through the store's cascade, its participation, goals and cards.
    async fn delete_match(&self, partido_id: Id) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait ParticipationStore: Send + Sync {
    async fn get_participation(&self, partido_id: Id, jugador_id: Id) -> AppResult<Participation>;
    async fn list_participation(&self, page: Pagination) -> AppResult<Vec<Participation>>;
    async fn create_participation(&self, participation: Participation) -> AppResult<Participation>;
    async fn delete_participation(&self, partido_id: Id, jugador_id: Id) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait GoalStore: Send + Sync {
    async fn get_goal(&self, gol_id: Id) -> AppResult<Goal>;
    async fn list_goals(&self, page: Pagination) -> AppResult<Vec<Goal>>;
    async fn create_goal(&self, goal: NewGoal) -> AppResult<Goal>;
    async fn delete_goal(&self, gol_id: Id) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait CardStore: Send + Sync {
    async fn get_card(&self, amonest_id: Id) -> AppResult<Card>;
    async fn list_cards(&self, page: Pagination) -> AppResult<Vec<Card>>;
    async fn create_card(&self, card: NewCard) -> AppResult<Card>;
    async fn delete_card(&self, amonest_id: Id) -> AppResult<()>;
}

#[async_trait::async_trait]
pub trait Store: MatchStore + ParticipationStore + GoalStore + CardStore + Send + Sync {
    /// One round trip to the backing store.
    async fn ping(&self) -> AppResult<()>;
}
