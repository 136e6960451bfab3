//! 基于内存的服务实现
//!
//! 以 DashMap 保存马匹与锦标赛，按递增序号分配标识；
//! 同时实现 `HorseService`、`BreedService` 与 `TournamentService`，用于离线演示与测试。
//!
use crate::breed_service::BreedService;
use crate::error::{AppError, AppResult};
use crate::horse_service::HorseService;
use crate::tournament_service::TournamentService;
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use paddock_domain::{
    Breed, BreedId, Entity, Horse, HorseId, HorseListing, HorseSearch, NewTournament, Sex,
    TournamentDetail, TournamentId, TournamentListing, TournamentParticipant, TournamentSearch,
    TournamentStandings,
};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryHorseStore {
    horses: DashMap<HorseId, Horse>,
    breeds: Vec<Breed>,
    tournaments: DashMap<TournamentId, TournamentDetail>,
    next_id: AtomicI64,
    next_tournament_id: AtomicI64,
}

impl Default for InMemoryHorseStore {
    fn default() -> Self {
        Self {
            horses: DashMap::new(),
            breeds: Vec::new(),
            tournaments: DashMap::new(),
            next_id: AtomicI64::new(1),
            next_tournament_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryHorseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定品种目录创建
    pub fn with_breeds(breeds: Vec<Breed>) -> Self {
        Self {
            breeds,
            ..Self::default()
        }
    }

    /// 带少量示例数据的存储（离线演示用）
    pub fn seeded() -> Self {
        let breed = |id: i64, name: &str| Breed {
            id: BreedId::new(id),
            name: name.to_owned(),
        };
        let store = Self::with_breeds(vec![
            breed(1, "Andalusian"),
            breed(2, "Appaloosa"),
            breed(3, "Arabian"),
            breed(4, "Haflinger"),
            breed(5, "Lipizzaner"),
            breed(6, "Shetland Pony"),
        ]);

        let seed = [
            ("Wendy", Sex::Female, (2005, 12, 12), 1.40, 380.0, Some(breed(5, "Lipizzaner"))),
            ("Hugo", Sex::Male, (2012, 2, 3), 1.55, 520.0, Some(breed(3, "Arabian"))),
            ("Bella", Sex::Female, (2003, 7, 6), 1.12, 210.0, Some(breed(6, "Shetland Pony"))),
            ("Thunder", Sex::Male, (2016, 4, 22), 1.68, 610.0, None),
        ];
        for (name, sex, (y, m, d), height, weight, breed) in seed {
            let Some(date_of_birth) = NaiveDate::from_ymd_opt(y, m, d) else {
                continue;
            };
            let id = HorseId::new(store.next_id.fetch_add(1, Ordering::SeqCst));
            store.horses.insert(
                id,
                Horse {
                    id: Some(id),
                    name: name.to_owned(),
                    sex,
                    date_of_birth,
                    height,
                    weight,
                    breed,
                },
            );
        }

        if let (Some(start_date), Some(end_date)) = (
            NaiveDate::from_ymd_opt(2024, 4, 1),
            NaiveDate::from_ymd_opt(2024, 4, 3),
        ) {
            let mut horses: Vec<Horse> = store.horses.iter().map(|e| e.value().clone()).collect();
            horses.sort_by_key(|h| h.id);
            let id = TournamentId::new(store.next_tournament_id.fetch_add(1, Ordering::SeqCst));
            store.insert_tournament(TournamentDetail {
                id,
                name: "Spring Cup".into(),
                start_date,
                end_date,
                participants: entries(&horses),
            });
        }
        store
    }

    pub fn insert_tournament(&self, tournament: TournamentDetail) {
        self.tournaments.insert(tournament.id, tournament);
    }

    pub fn len(&self) -> usize {
        self.horses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.horses.is_empty()
    }

    fn not_found(id: HorseId) -> AppError {
        AppError::NotFound(format!("horse with id {id} not found"))
    }
}

/// 按提交顺序编号，全部从首轮开始
fn entries(horses: &[Horse]) -> Vec<TournamentParticipant> {
    horses
        .iter()
        .zip(1..)
        .filter_map(|(h, entry_number)| {
            Some(TournamentParticipant {
                horse_id: h.id?,
                name: h.name.clone(),
                date_of_birth: h.date_of_birth,
                entry_number,
                round_reached: 1,
            })
        })
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl HorseService for InMemoryHorseStore {
    async fn get_by_id(&self, id: HorseId) -> AppResult<Horse> {
        self.horses
            .get(&id)
            .map(|h| h.value().clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, horse: &Horse) -> AppResult<Horse> {
        let id = HorseId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Horse {
            id: Some(id),
            ..horse.clone()
        };
        self.horses.insert(id, stored.clone());
        Ok(stored)
    }

    async fn edit(&self, horse: &Horse) -> AppResult<Horse> {
        let id = horse.require_id()?;
        let mut entry = self.horses.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        *entry = horse.clone();
        Ok(entry.clone())
    }

    async fn delete(&self, id: HorseId) -> AppResult<()> {
        self.horses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn search(&self, search: &HorseSearch) -> AppResult<Vec<HorseListing>> {
        let mut found: Vec<HorseListing> = self
            .horses
            .iter()
            .map(|e| e.value().clone())
            .filter(|h| {
                search
                    .name
                    .as_deref()
                    .is_none_or(|name| contains_ignore_case(&h.name, name))
            })
            .filter(|h| search.sex.is_none_or(|sex| h.sex == sex))
            .filter(|h| search.born_earliest.is_none_or(|d| h.date_of_birth >= d))
            .filter(|h| search.born_latest.is_none_or(|d| h.date_of_birth <= d))
            .filter(|h| {
                search.breed_name.as_deref().is_none_or(|breed| {
                    h.breed
                        .as_ref()
                        .is_some_and(|b| contains_ignore_case(&b.name, breed))
                })
            })
            .map(|h| HorseListing {
                id: h.id,
                name: h.name,
                sex: h.sex,
                date_of_birth: h.date_of_birth,
                breed: h.breed,
            })
            .collect();

        found.sort_by_key(|h| h.id);
        if let Some(limit) = search.limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }
}

#[async_trait]
impl BreedService for InMemoryHorseStore {
    async fn by_name(&self, prefix: &str, limit: usize) -> AppResult<Vec<Breed>> {
        Ok(self
            .breeds
            .iter()
            .filter(|b| contains_ignore_case(&b.name, prefix))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TournamentService for InMemoryHorseStore {
    async fn search(&self, search: &TournamentSearch) -> AppResult<Vec<TournamentListing>> {
        let mut found: Vec<TournamentListing> = self
            .tournaments
            .iter()
            .map(|e| e.value().listing())
            .filter(|t| {
                search
                    .name
                    .as_deref()
                    .is_none_or(|name| contains_ignore_case(&t.name, name))
            })
            // 与筛选区间有重叠即命中
            .filter(|t| search.start_date.is_none_or(|d| t.end_date >= d))
            .filter(|t| search.end_date.is_none_or(|d| t.start_date <= d))
            .collect();
        found.sort_by_key(|t| t.start_date);
        Ok(found)
    }

    async fn create(&self, tournament: &NewTournament) -> AppResult<TournamentDetail> {
        let mut problems = Vec::new();
        if tournament.name.trim().is_empty() {
            problems.push("No name given".to_string());
        }
        if tournament.end_date < tournament.start_date {
            problems.push("Start date must be before end date".to_string());
        }
        let mut horses = Vec::with_capacity(tournament.participants.len());
        for selected in &tournament.participants {
            match self.horses.get(&selected.id) {
                Some(horse) => horses.push(horse.value().clone()),
                None => problems.push(format!("No horse with id {} found", selected.id)),
            }
        }
        if !problems.is_empty() {
            return Err(AppError::Validation(format!(
                "Validation of tournament for create failed: {}",
                problems.join("; ")
            )));
        }

        let id = TournamentId::new(self.next_tournament_id.fetch_add(1, Ordering::SeqCst));
        let detail = TournamentDetail {
            id,
            name: tournament.name.clone(),
            start_date: tournament.start_date,
            end_date: tournament.end_date,
            participants: entries(&horses),
        };
        self.insert_tournament(detail.clone());
        Ok(detail)
    }

    async fn standings(&self, id: TournamentId) -> AppResult<TournamentStandings> {
        self.tournaments
            .get(&id)
            .map(|t| t.value().standings())
            .ok_or_else(|| AppError::NotFound(format!("tournament with id {id} not found")))
    }
}
