/// 提示通知（Notifier）
///
/// 即发即忘：调用方不关心结果，也不等待展示完成。
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str, title: Option<&str>);
}

/// 将提示写入日志的通知实现（无界面环境使用）
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "paddock::notify", "{message}");
    }

    fn error(&self, message: &str, title: Option<&str>) {
        match title {
            Some(title) => tracing::error!(target: "paddock::notify", "{title}: {message}"),
            None => tracing::error!(target: "paddock::notify", "{message}"),
        }
    }
}
