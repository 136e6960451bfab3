//! 日期筛选解析
//!
//! 搜索表单中的日期以原始字符串保存；空串表示“不筛选”。
//!
use crate::error::{DomainError, DomainResult};
use chrono::{Local, NaiveDate};

/// 后端契约使用的日期格式（ISO-8601 日期）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 本地时区的今天，作为出生日期的结构性默认值
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 解析可选的日期筛选值
///
/// - `None` 或空白字符串 → `Ok(None)`（移除该筛选条件）；
/// - 其余按 `YYYY-MM-DD` 解析，失败返回 `DomainError::Parse`。
pub fn parse_date_filter(raw: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| DomainError::Parse {
            reason: format!("invalid date '{raw}': {e}"),
        })
}
