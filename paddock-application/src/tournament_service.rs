use crate::error::AppResult;
use async_trait::async_trait;
use paddock_domain::{
    NewTournament, TournamentDetail, TournamentId, TournamentListing, TournamentSearch,
    TournamentStandings,
};

/// 锦标赛服务
#[async_trait]
pub trait TournamentService: Send + Sync {
    async fn search(&self, search: &TournamentSearch) -> AppResult<Vec<TournamentListing>>;

    async fn create(&self, tournament: &NewTournament) -> AppResult<TournamentDetail>;

    async fn standings(&self, id: TournamentId) -> AppResult<TournamentStandings>;
}
