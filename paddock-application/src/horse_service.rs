use crate::error::AppResult;
use async_trait::async_trait;
use paddock_domain::{Horse, HorseId, HorseListing, HorseSearch};

/// 马匹记录服务（Record Service）
///
/// 对远端马匹集合的增删改查；所有调用均为异步，网络或服务端失败以
/// [`AppError`](crate::error::AppError) 返回。
#[async_trait]
pub trait HorseService: Send + Sync {
    async fn get_by_id(&self, id: HorseId) -> AppResult<Horse>;

    async fn create(&self, horse: &Horse) -> AppResult<Horse>;

    /// 更新已持久化的记录（以记录自身的 id 为准）
    async fn edit(&self, horse: &Horse) -> AppResult<Horse>;

    async fn delete(&self, id: HorseId) -> AppResult<()>;

    async fn search(&self, search: &HorseSearch) -> AppResult<Vec<HorseListing>>;
}
