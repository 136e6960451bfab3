use crate::error::AppResult;
use async_trait::async_trait;
use paddock_domain::Breed;

/// 品种建议服务（Suggestion Service）
///
/// - 按名称前缀查找品种，最多返回 `limit` 条；
/// - 组件不会以空前缀调用该服务。
#[async_trait]
pub trait BreedService: Send + Sync {
    async fn by_name(&self, prefix: &str, limit: usize) -> AppResult<Vec<Breed>>;
}
