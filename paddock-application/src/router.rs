use crate::error::AppResult;
use crate::routing::RoutePath;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// 路由器（Router）
///
/// 接受导航请求；路由数据与路径参数以 [`ActivatedRoute`](crate::routing::ActivatedRoute)
/// 快照的形式在组件初始化时投递。
#[async_trait]
pub trait Router: Send + Sync {
    async fn navigate(&self, path: &RoutePath) -> AppResult<()>;
}

/// 记录导航历史的路由器（无界面环境使用）
#[derive(Debug, Default)]
pub struct HistoryRouter {
    history: Mutex<Vec<RoutePath>>,
}

impl HistoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前所在路径（尚未导航时为 `None`）
    pub fn current(&self) -> Option<RoutePath> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn history(&self) -> Vec<RoutePath> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Router for HistoryRouter {
    async fn navigate(&self, path: &RoutePath) -> AppResult<()> {
        tracing::info!(%path, "navigated");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.clone());
        Ok(())
    }
}
