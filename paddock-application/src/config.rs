//! 客户端配置
//!
//! 按以下优先级合并（后者覆盖前者）：
//! 1. 内置默认值；
//! 2. 当前目录（或上级目录）中的 `paddock.toml`；
//! 3. `PADDOCK_` 前缀的环境变量（如 `PADDOCK_BACKEND_URL`）。
//!
use crate::error::{AppError, AppResult};
use crate::listing::ListConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE: &str = "paddock.toml";
pub const ENV_PREFIX: &str = "PADDOCK_";
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 后端根地址，例如 `http://localhost:8080`
    pub backend_url: String,
    /// 品种建议的最大条数
    pub suggestion_limit: usize,
    /// 搜索防抖静默期（毫秒）
    pub search_debounce_ms: u64,
    /// 单次请求超时（毫秒）
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            search_debounce_ms: 300,
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    /// 从默认值、配置文件与环境变量加载
    pub fn load() -> AppResult<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> AppResult<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        tracing::debug!(?config, "client configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.backend_url.trim().is_empty() {
            return Err(AppError::Config("backend_url must not be empty".into()));
        }
        if self.suggestion_limit == 0 {
            return Err(AppError::Config("suggestion_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn list_config(&self) -> ListConfig {
        ListConfig {
            search_debounce: self.search_debounce(),
            suggestion_limit: self.suggestion_limit,
        }
    }
}
