use crate::query::append_query;
use crate::response::{ensure_success, map_transport_error, read_json};
use async_trait::async_trait;
use paddock_application::breed_service::BreedService;
use paddock_application::horse_service::HorseService;
use paddock_application::tournament_service::TournamentService;
use paddock_application::{AppError, AppResult, ClientConfig};
use paddock_domain::{
    Breed, Entity, Horse, HorseId, HorseListing, HorseSearch, NewTournament, TournamentDetail,
    TournamentId, TournamentListing, TournamentSearch, TournamentStandings,
};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, instrument};

/// 品种查询参数
#[derive(Debug, Serialize)]
struct BreedSearch<'a> {
    name: &'a str,
    limit: usize,
}

/// 后端 REST 客户端
#[derive(Debug, Clone)]
pub struct RestClient {
    base: Url,
    http: Client,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let base = Url::parse(&config.backend_url)
            .map_err(|e| AppError::Config(format!("invalid backend url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "backend url cannot be a base: {base}"
            )));
        }

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(map_transport_error)?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("backend url cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn horse_endpoint(&self, id: HorseId) -> AppResult<Url> {
        self.endpoint(&["horses", &id.to_string()])
    }
}

#[async_trait]
impl HorseService for RestClient {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: HorseId) -> AppResult<Horse> {
        let url = self.horse_endpoint(id)?;
        let response = self.http.get(url).send().await.map_err(map_transport_error)?;
        read_json(response).await
    }

    #[instrument(skip_all, fields(name = %horse.name))]
    async fn create(&self, horse: &Horse) -> AppResult<Horse> {
        let url = self.endpoint(&["horses"])?;
        let response = self
            .http
            .post(url)
            .json(horse)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    #[instrument(skip_all, fields(id = ?horse.id))]
    async fn edit(&self, horse: &Horse) -> AppResult<Horse> {
        let url = self.horse_endpoint(horse.require_id()?)?;
        let response = self
            .http
            .put(url)
            .json(horse)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: HorseId) -> AppResult<()> {
        let url = self.horse_endpoint(id)?;
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, search: &HorseSearch) -> AppResult<Vec<HorseListing>> {
        let mut url = self.endpoint(&["horses"])?;
        append_query(&mut url, search)?;
        debug!(%url, "searching horses");
        let response = self.http.get(url).send().await.map_err(map_transport_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl BreedService for RestClient {
    #[instrument(skip(self))]
    async fn by_name(&self, name: &str, limit: usize) -> AppResult<Vec<Breed>> {
        let mut url = self.endpoint(&["breeds"])?;
        append_query(&mut url, &BreedSearch { name, limit })?;
        let response = self.http.get(url).send().await.map_err(map_transport_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl TournamentService for RestClient {
    #[instrument(skip(self))]
    async fn search(&self, search: &TournamentSearch) -> AppResult<Vec<TournamentListing>> {
        let mut url = self.endpoint(&["tournaments"])?;
        append_query(&mut url, search)?;
        let response = self.http.get(url).send().await.map_err(map_transport_error)?;
        read_json(response).await
    }

    #[instrument(skip_all, fields(name = %tournament.name))]
    async fn create(&self, tournament: &NewTournament) -> AppResult<TournamentDetail> {
        let url = self.endpoint(&["tournaments"])?;
        let response = self
            .http
            .post(url)
            .json(tournament)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn standings(&self, id: TournamentId) -> AppResult<TournamentStandings> {
        let url = self.endpoint(&["tournaments", &id.to_string(), "standings"])?;
        let response = self.http.get(url).send().await.map_err(map_transport_error)?;
        read_json(response).await
    }
}
