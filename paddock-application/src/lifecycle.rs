//! 组件生命周期
//!
//! 每个组件持有一个取消令牌；所有在途请求与该令牌竞速。
//! 组件销毁（`teardown` 或 `Drop`）时取消令牌，迟到的响应不再触达组件状态。
//!
use crate::error::{AppError, AppResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// 在令牌取消前等待 `fut` 完成；取消优先，已取消时不会轮询 `fut`
pub async fn cancellable<F, T>(token: &CancellationToken, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        result = fut => result,
    }
}

/// 组件生命周期：拥有者销毁时取消全部在途请求
#[derive(Debug)]
pub struct Lifecycle {
    token: CancellationToken,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 供外部（例如导航离开时）销毁组件的句柄
    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            token: self.token.clone(),
        }
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        cancellable(&self.token, fut).await
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// 生命周期句柄（令牌副本）
#[derive(Debug, Clone)]
pub struct LifecycleHandle {
    token: CancellationToken,
}

impl LifecycleHandle {
    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}
