//! 响应与传输错误映射
//!
//! - 无法连接/超时 → `Transport { status: None }`（后端不可达）；
//! - 404 → `NotFound`；422 → `Validation`（带后端校验消息）；
//! - 其它非 2xx → `Transport { status: Some(code) }`，消息为响应正文；
//! - 已收到响应但正文读取失败 → `Transport { status: Some(code) }`；
//! - 2xx 正文无法解析 → `Domain(Serde)`。
//!
use paddock_application::{AppError, AppResult};
use paddock_domain::DomainError;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// 后端 422 响应正文
#[derive(Debug, Deserialize)]
struct ValidationErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<String>,
}

impl ValidationErrorBody {
    fn summary(&self) -> String {
        if self.errors.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", self.message, self.errors.join(", "))
        }
    }
}

/// 发送请求时的错误；只有连接失败与超时视为后端不可达，其余状态未知时记为 0
pub fn map_transport_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        return AppError::Config(err.to_string());
    }
    let status = if err.is_connect() || err.is_timeout() {
        None
    } else {
        Some(err.status().map_or(0, |s| s.as_u16()))
    };
    AppError::Transport {
        status,
        message: err.to_string(),
    }
}

/// 已收到响应后读取正文失败
fn body_error(status: StatusCode, err: reqwest::Error) -> AppError {
    AppError::Transport {
        status: Some(status.as_u16()),
        message: err.to_string(),
    }
}

/// 非 2xx 响应转为错误
pub async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(|e| body_error(status, e))?;
    tracing::debug!(%status, %body, "backend rejected request");
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(body),
        StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(
            serde_json::from_str::<ValidationErrorBody>(&body)
                .map(|b| b.summary())
                .unwrap_or(body),
        ),
        other => AppError::Transport {
            status: Some(other.as_u16()),
            message: body,
        },
    }
}

/// 校验状态并解析 JSON 正文
pub async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let response = ensure_success(response).await?;
    let status = response.status();
    let body = response.bytes().await.map_err(|e| body_error(status, e))?;
    decode(&body)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "backend sent an undecodable body");
        AppError::Domain(DomainError::from(e))
    })
}
