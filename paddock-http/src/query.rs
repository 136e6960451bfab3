use paddock_application::{AppError, AppResult};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

/// 将搜索条件按字段名追加为查询参数；未设置的字段不出现
pub fn append_query<T: Serialize>(url: &mut Url, search: &T) -> AppResult<()> {
    let value = serde_json::to_value(search).map_err(paddock_domain::DomainError::from)?;
    let Value::Object(fields) = value else {
        return Err(AppError::Validation(
            "search criteria must serialize to an object".into(),
        ));
    };

    let mut pairs = url.query_pairs_mut();
    for (key, value) in fields {
        match value {
            Value::Null => {}
            Value::String(s) => {
                pairs.append_pair(&key, &s);
            }
            other => {
                pairs.append_pair(&key, &other.to_string());
            }
        }
    }
    drop(pairs);

    // 没有任何参数时去掉末尾的 `?`
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(())
}
