//! 赛马锦标赛客户端领域层（paddock-domain）
//!
//! 提供与后端 REST 契约对齐的领域记录与值对象：
//! - 马匹（`horse`）、品种与锦标赛（`tournament`）记录；
//! - 标识（`value_object`）与实体（`entity`）抽象；
//! - 字段“未提供/已提供”标记（`presence`）；
//! - 日期筛选解析（`date`）与统一错误（`error`）。
//!
//! 本 crate 不依赖任何运行时或传输实现，应用层与适配层在其上构建。
//!
pub mod date;
pub mod entity;
pub mod error;
pub mod horse;
pub mod presence;
pub mod tournament;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use horse::{Breed, Horse, HorseDraft, HorseListing, HorseSearch, Sex};
pub use presence::Presence;
pub use tournament::{
    HorseSelection, NewTournament, StandingsTree, TournamentDetail, TournamentDraft,
    TournamentListing, TournamentParticipant, TournamentSearch, TournamentStandings,
};
pub use value_object::{BreedId, HorseId, TournamentId};
