#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use paddock_application::breed_service::BreedService;
use paddock_application::horse_service::HorseService;
use paddock_application::notifier::Notifier;
use paddock_application::router::Router;
use paddock_application::routing::RoutePath;
use paddock_application::tournament_service::TournamentService;
use paddock_application::{AppError, AppResult};
use paddock_domain::{
    Breed, BreedId, Horse, HorseId, HorseListing, HorseSearch, NewTournament, Sex,
    TournamentDetail, TournamentId, TournamentListing, TournamentParticipant, TournamentSearch,
    TournamentStandings,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn unreachable() -> AppError {
    AppError::Transport {
        status: None,
        message: "connection refused".into(),
    }
}

pub fn sample_horse(id: i64, name: &str) -> Horse {
    Horse {
        id: Some(HorseId::new(id)),
        name: name.into(),
        sex: Sex::Male,
        date_of_birth: NaiveDate::from_ymd_opt(2015, 4, 12).unwrap(),
        height: 1.62,
        weight: 510.0,
        breed: Some(Breed {
            id: BreedId::new(3),
            name: "Arabian".into(),
        }),
    }
}

pub fn listing(horse: &Horse) -> HorseListing {
    HorseListing {
        id: horse.id,
        name: horse.name.clone(),
        sex: horse.sex,
        date_of_birth: horse.date_of_birth,
        breed: horse.breed.clone(),
    }
}

/// 记录调用的马匹服务
#[derive(Default)]
pub struct SpyHorseService {
    pub stored: Mutex<Option<Horse>>,
    pub listed: Mutex<Vec<HorseListing>>,
    pub fail: AtomicBool,
    pub delay: Mutex<Option<Duration>>,
    pub get_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub searches: Mutex<Vec<HorseSearch>>,
}

impl SpyHorseService {
    pub fn with_horse(horse: Horse) -> Arc<Self> {
        let spy = Self::default();
        *spy.stored.lock().unwrap() = Some(horse);
        Arc::new(spy)
    }

    pub fn failing() -> Arc<Self> {
        let spy = Self::default();
        spy.fail.store(true, Ordering::SeqCst);
        Arc::new(spy)
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn set_listed(&self, horses: Vec<HorseListing>) {
        *self.listed.lock().unwrap() = horses;
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    async fn respond<T>(&self, value: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(unreachable());
        }
        value()
    }
}

#[async_trait]
impl HorseService for SpyHorseService {
    async fn get_by_id(&self, id: HorseId) -> AppResult<Horse> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(|| {
            self.stored
                .lock()
                .unwrap()
                .clone()
                .filter(|h| h.id == Some(id))
                .ok_or_else(|| AppError::NotFound(format!("horse {id}")))
        })
        .await
    }

    async fn create(&self, horse: &Horse) -> AppResult<Horse> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(|| {
            Ok(Horse {
                id: Some(HorseId::new(100)),
                ..horse.clone()
            })
        })
        .await
    }

    async fn edit(&self, horse: &Horse) -> AppResult<Horse> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(|| Ok(horse.clone())).await
    }

    async fn delete(&self, _id: HorseId) -> AppResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(|| Ok(())).await
    }

    async fn search(&self, search: &HorseSearch) -> AppResult<Vec<HorseListing>> {
        self.searches.lock().unwrap().push(search.clone());
        self.respond(|| Ok(self.listed.lock().unwrap().clone())).await
    }
}

/// 记录调用的品种服务
#[derive(Default)]
pub struct SpyBreedService {
    pub catalog: Vec<Breed>,
    pub calls: AtomicUsize,
}

impl SpyBreedService {
    pub fn with_names(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            catalog: names
                .iter()
                .enumerate()
                .map(|(i, name)| Breed {
                    id: BreedId::new(i as i64 + 1),
                    name: (*name).into(),
                })
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BreedService for SpyBreedService {
    // 故意忽略 limit，由组件负责截断
    async fn by_name(&self, prefix: &str, _limit: usize) -> AppResult<Vec<Breed>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prefix = prefix.to_lowercase();
        Ok(self
            .catalog
            .iter()
            .filter(|b| b.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct SpyTournamentService {
    pub listed: Vec<TournamentListing>,
    pub standings: Option<TournamentStandings>,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub created: Mutex<Vec<NewTournament>>,
    pub standings_calls: AtomicUsize,
}

impl SpyTournamentService {
    pub fn created(&self) -> Vec<NewTournament> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl TournamentService for SpyTournamentService {
    async fn search(&self, _search: &TournamentSearch) -> AppResult<Vec<TournamentListing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(unreachable());
        }
        Ok(self.listed.clone())
    }

    async fn create(&self, tournament: &NewTournament) -> AppResult<TournamentDetail> {
        self.created.lock().unwrap().push(tournament.clone());
        if self.fail {
            return Err(AppError::Validation(
                "Validation of tournament for create failed: No horse with id 8 found".into(),
            ));
        }
        Ok(TournamentDetail {
            id: TournamentId::new(10),
            name: tournament.name.clone(),
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            participants: tournament
                .participants
                .iter()
                .zip(1..)
                .map(|(h, entry_number)| TournamentParticipant {
                    horse_id: h.id,
                    name: h.name.clone(),
                    date_of_birth: h.date_of_birth,
                    entry_number,
                    round_reached: 1,
                })
                .collect(),
        })
    }

    async fn standings(&self, id: TournamentId) -> AppResult<TournamentStandings> {
        self.standings_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(unreachable());
        }
        self.standings
            .clone()
            .ok_or_else(|| AppError::NotFound(format!("tournament with id {id} not found")))
    }
}

#[derive(Default)]
pub struct SpyRouter {
    pub visited: Mutex<Vec<RoutePath>>,
}

impl SpyRouter {
    pub fn visited(&self) -> Vec<RoutePath> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Router for SpyRouter {
    async fn navigate(&self, path: &RoutePath) -> AppResult<()> {
        self.visited.lock().unwrap().push(path.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error {
        message: String,
        title: Option<String>,
    },
}

#[derive(Default)]
pub struct SpyNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl SpyNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<(String, Option<String>)> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error { message, title } => Some((message, title)),
                Notice::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Success(message) => Some(message),
                Notice::Error { .. } => None,
            })
            .collect()
    }
}

impl Notifier for SpyNotifier {
    fn success(&self, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push(Notice::Success(message.into()));
    }

    fn error(&self, message: &str, title: Option<&str>) {
        self.notices.lock().unwrap().push(Notice::Error {
            message: message.into(),
            title: title.map(str::to_owned),
        });
    }
}
