//! 列表组件的共用部分
//!
//! 列表组件由三部分组成：
//! - `SearchForm`：以原始字符串保存的搜索表单，转换为搜索条件；
//! - `ListSource`：按搜索条件获取记录的数据源；
//! - `SearchList`：持有表单、记录与横幅错误，负责加载失败提示与搜索防抖。
//!
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::{AppError, AppResult};
use crate::lifecycle::{Lifecycle, LifecycleHandle, cancellable};
use crate::notifier::Notifier;
use async_trait::async_trait;
use paddock_domain::DomainResult;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// 列表组件配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// 搜索条件变化后的静默期
    pub search_debounce: Duration,
    /// 品种建议的最大条数
    pub suggestion_limit: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        ClientConfig::default().list_config()
    }
}

/// 搜索表单
pub trait SearchForm: fmt::Debug + Clone + Default + Send + 'static {
    type Search: fmt::Debug + Send + Sync + 'static;

    /// 转换为搜索条件；空白字段不参与筛选
    fn to_search(&self) -> DomainResult<Self::Search>;
}

/// 列表数据源
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Form: SearchForm;
    type Item: Clone + Send + 'static;

    /// 横幅中使用的名词（如 `horses`）
    const NOUN: &'static str;
    /// 加载失败提示的标题
    const FAILURE_TITLE: &'static str;

    async fn fetch(
        &self,
        search: &<Self::Form as SearchForm>::Search,
    ) -> AppResult<Vec<Self::Item>>;
}

struct ListState<F, T> {
    items: Vec<T>,
    banner_error: Option<String>,
    form: F,
}

struct Shared<S: ListSource> {
    source: S,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ListState<S::Form, S::Item>>,
}

impl<S: ListSource> Shared<S> {
    fn fail(&self, err: &AppError) {
        lock(&self.state).banner_error = Some(format!("Could not fetch {}: {err}", S::NOUN));
    }

    async fn reload(&self, token: &CancellationToken) -> AppResult<()> {
        let form = lock(&self.state).form.clone();
        let search = match form.to_search() {
            Ok(search) => search,
            Err(err) => {
                let err = AppError::from(err);
                self.fail(&err);
                return Err(err);
            }
        };
        debug!(?search, noun = S::NOUN, "reloading list");

        match cancellable(token, self.source.fetch(&search)).await {
            Ok(items) => {
                lock(&self.state).items = items;
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                error!(error = %err, noun = S::NOUN, "error fetching list");
                self.fail(&err);
                self.notifier
                    .error(&fetch_failure_message(&err), Some(S::FAILURE_TITLE));
                Err(err)
            }
        }
    }
}

/// 可搜索列表：首次加载、防抖重新加载、横幅错误
pub struct SearchList<S: ListSource> {
    shared: Arc<Shared<S>>,
    config: ListConfig,
    debouncer: Option<Debouncer>,
    lifecycle: Lifecycle,
}

impl<S: ListSource> SearchList<S> {
    pub fn new(source: S, notifier: Arc<dyn Notifier>, config: ListConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                notifier,
                state: Mutex::new(ListState {
                    items: Vec::new(),
                    banner_error: None,
                    form: S::Form::default(),
                }),
            }),
            config,
            debouncer: None,
            lifecycle: Lifecycle::new(),
        }
    }

    /// 首次加载并启动搜索防抖
    pub async fn init(&mut self) -> AppResult<()> {
        let loaded = self.reload().await;

        let shared = self.shared.clone();
        let token = self.lifecycle.token();
        let reload_token = token.clone();
        self.debouncer = Some(Debouncer::spawn(
            self.config.search_debounce,
            token,
            move || {
                let shared = shared.clone();
                let token = reload_token.clone();
                async move {
                    // 失败已在 reload 中提示
                    let _ = shared.reload(&token).await;
                }
            },
        ));

        loaded
    }

    pub async fn reload(&self) -> AppResult<()> {
        self.shared.reload(&self.lifecycle.token()).await
    }

    /// 搜索条件已变化（防抖后重新加载）
    pub fn search_changed(&self) {
        match &self.debouncer {
            Some(debouncer) => debouncer.poke(),
            None => debug!(noun = S::NOUN, "search changed before init, ignored"),
        }
    }

    pub fn update_search(&self, edit: impl FnOnce(&mut S::Form)) {
        edit(&mut lock(&self.shared.state).form);
    }

    pub fn search_form(&self) -> S::Form {
        lock(&self.shared.state).form.clone()
    }

    pub fn items(&self) -> Vec<S::Item> {
        lock(&self.shared.state).items.clone()
    }

    pub fn banner_error(&self) -> Option<String> {
        lock(&self.shared.state).banner_error.clone()
    }

    pub fn config(&self) -> ListConfig {
        self.config
    }

    pub(crate) fn source(&self) -> &S {
        &self.shared.source
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.shared.notifier.as_ref()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.lifecycle.token()
    }

    /// 在列表生命周期内执行请求
    pub(crate) async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.lifecycle.run(fut).await
    }

    pub fn lifecycle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    pub fn teardown(&self) {
        self.lifecycle.teardown();
    }
}

/// 加载失败时展示给用户的消息
///
/// 后端不可达时给出提示，否则透传后端返回的消息。
pub fn fetch_failure_message(err: &AppError) -> String {
    match err {
        AppError::Transport { status: None, .. } => "Is the backend up?".to_string(),
        AppError::Transport { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// 状态锁；持锁方 panic 后仍继续使用最后写入的状态
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 去除首尾空白，空串视为未填写
pub(crate) fn non_blank(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
