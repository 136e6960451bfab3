//! 防抖
//!
//! 搜索条件变化的信号在静默期（默认 300ms）内合并，静默期结束后触发一次回调。
//! 防抖任务绑定在组件的取消令牌上，组件销毁即退出。
//!
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

pub struct Debouncer {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// 启动防抖任务
    pub fn spawn<F, Fut>(quiet: Duration, token: CancellationToken, mut on_settled: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let task = tokio::spawn(async move {
            loop {
                // 等待首个信号
                tokio::select! {
                    _ = token.cancelled() => return,
                    signal = rx.recv() => {
                        if signal.is_none() {
                            return;
                        }
                    }
                }

                // 静默期内的新信号重新计时
                loop {
                    tokio::select! {
                        _ = token.cancelled() => return,
                        _ = time::sleep(quiet) => break,
                        signal = rx.recv() => {
                            if signal.is_none() {
                                return;
                            }
                        }
                    }
                }

                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = on_settled() => {}
                }
            }
        });

        Self { tx, task }
    }

    /// 发送一次变化信号
    pub fn poke(&self) {
        let _ = self.tx.send(());
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
