//! 实体（Entity）基础抽象
//!
//! 记录的标识由后端在持久化时分配：标识存在当且仅当记录已持久化。
//!
use crate::error::{DomainError, DomainResult};
use std::{fmt::Display, str::FromStr};

/// 具备（可选）唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体名称，用于日志与错误信息
    const NAME: &'static str;

    /// 实体标识类型，要求可解析、可显示与可复制
    type Id: FromStr + Copy + Display;

    /// 获取实体标识；未持久化时为 `None`
    fn id(&self) -> Option<Self::Id>;

    /// 是否已持久化
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }

    /// 获取标识，未持久化时返回 `MissingIdentifier`
    fn require_id(&self) -> DomainResult<Self::Id> {
        self.id()
            .ok_or(DomainError::MissingIdentifier { entity: Self::NAME })
    }
}
