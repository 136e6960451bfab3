use crate::view_mode::ViewMode;
use paddock_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    /// 网络或服务端失败；`status` 为空表示后端不可达
    #[error("transport: status={status:?}, {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported mode: {0}")]
    UnsupportedMode(ViewMode),

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("config: {0}")]
    Config(String),
}

impl AppError {
    /// 后端不可达（未收到任何 HTTP 响应）
    pub fn is_unreachable(&self) -> bool {
        matches!(self, AppError::Transport { status: None, .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
