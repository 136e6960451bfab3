//! 赛马锦标赛客户端 REST 适配层（paddock-http）
//!
//! 以 `reqwest` 实现应用层端口：
//! - `HorseService`：`/horses` 的增删改查与搜索；
//! - `BreedService`：`/breeds` 按名称查询；
//! - `TournamentService`：`/tournaments` 搜索。
//!
//! 传输失败与非 2xx 响应统一映射为 `AppError`（见 [`response`]）。
//!
pub mod client;
pub mod query;
pub mod response;

pub use client::RestClient;
