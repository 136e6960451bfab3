//! 马匹创建/编辑/详情视图组件
//!
//! 组件在初始化时由路由数据确定模式（创建/编辑/详情）：
//! - 编辑与详情模式按路由参数 `id` 单次加载记录，失败时提示并回到列表；
//! - 出生日期、身高、体重以 `Presence` 跟踪是否已提供；
//! - 提交按模式调用创建或更新，删除按记录标识调用删除；
//! - 所有请求绑定组件生命周期，销毁后不再改变状态、提示或导航。
//!
use crate::breed_service::BreedService;
use crate::config::DEFAULT_SUGGESTION_LIMIT;
use crate::error::{AppError, AppResult};
use crate::horse_service::HorseService;
use crate::lifecycle::{Lifecycle, LifecycleHandle, cancellable};
use crate::notifier::Notifier;
use crate::router::Router;
use crate::routing::{ActivatedRoute, RoutePath};
use crate::view_mode::ViewMode;
use bon::Builder;
use chrono::NaiveDate;
use futures_core::stream::BoxStream;
use futures_util::{future, stream};
use paddock_domain::{Breed, Entity, HorseDraft, HorseId, Sex};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Builder)]
pub struct HorseCreateEdit {
    service: Arc<dyn HorseService>,
    breeds: Arc<dyn BreedService>,
    router: Arc<dyn Router>,
    notifier: Arc<dyn Notifier>,
    #[builder(default = DEFAULT_SUGGESTION_LIMIT)]
    suggestion_limit: usize,
    #[builder(skip)]
    mode: ViewMode,
    #[builder(skip)]
    draft: HorseDraft,
    #[builder(skip)]
    lifecycle: Lifecycle,
}

impl HorseCreateEdit {
    /// 初始化：读取路由模式；编辑/详情模式加载记录
    pub async fn init(&mut self, route: &ActivatedRoute) -> AppResult<()> {
        if let Some(mode) = route.mode() {
            self.mode = mode;
        }
        debug!(mode = %self.mode, "horse view initialised");

        match self.mode {
            ViewMode::Create => Ok(()),
            ViewMode::Edit | ViewMode::Detail => self.load(route).await,
        }
    }

    async fn load(&mut self, route: &ActivatedRoute) -> AppResult<()> {
        let loaded = match route.id::<HorseId>() {
            Ok(id) => {
                debug!(%id, "loading horse");
                self.lifecycle.run(self.service.get_by_id(id)).await
            }
            Err(err) => Err(err),
        };

        match loaded {
            Ok(horse) => {
                self.draft = HorseDraft::loaded(horse);
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                warn!(error = %err, "could not load horse, are all systems running?");
                self.notifier
                    .error("Is the backend running?", Some("Unable to load horse data"));
                self.navigate(RoutePath::horses()).await;
                Err(err)
            }
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn mode_is_create(&self) -> bool {
        self.mode == ViewMode::Create
    }

    pub fn mode_is_edit(&self) -> bool {
        self.mode == ViewMode::Edit
    }

    pub fn mode_is_detail(&self) -> bool {
        self.mode == ViewMode::Detail
    }

    pub fn heading(&self) -> &'static str {
        self.mode.heading()
    }

    pub fn submit_label(&self) -> &'static str {
        self.mode.submit_label()
    }

    pub fn draft(&self) -> &HorseDraft {
        &self.draft
    }

    pub fn name(&self) -> &str {
        self.draft.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.set_name(name);
    }

    pub fn sex(&self) -> Sex {
        self.draft.sex()
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.draft.set_sex(sex);
    }

    pub fn sex_label(&self) -> &'static str {
        self.draft.sex().label()
    }

    pub fn breed(&self) -> Option<&Breed> {
        self.draft.breed()
    }

    pub fn set_breed(&mut self, breed: Option<Breed>) {
        self.draft.set_breed(breed);
    }

    pub fn height(&self) -> Option<f32> {
        self.draft.height()
    }

    pub fn set_height(&mut self, height: f32) {
        self.draft.set_height(height);
    }

    pub fn weight(&self) -> Option<f32> {
        self.draft.weight()
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.draft.set_weight(weight);
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.draft.date_of_birth()
    }

    pub fn set_date_of_birth(&mut self, date_of_birth: NaiveDate) {
        self.draft.set_date_of_birth(date_of_birth);
    }

    /// 详情 → 编辑：仅已持久化的记录可切换；不会重新加载记录
    pub async fn switch_to_edit(&mut self) -> AppResult<()> {
        let id = match self.draft.require_id() {
            Ok(id) => id,
            Err(err) => {
                self.notifier.error(
                    "Unable to switch to edit mode. Horse with given ID is not available.",
                    None,
                );
                return Err(err.into());
            }
        };

        self.mode = ViewMode::Edit;
        self.navigate(RoutePath::horse_edit(id)).await;
        Ok(())
    }

    /// 品种建议：空输入直接给出一次空结果，不调用建议服务
    pub fn breed_suggestions(&self, input: &str) -> BoxStream<'static, AppResult<Vec<Breed>>> {
        if input.is_empty() {
            return Box::pin(stream::once(future::ready(Ok(Vec::new()))));
        }

        let breeds = self.breeds.clone();
        let token = self.lifecycle.token();
        let limit = self.suggestion_limit;
        let prefix = input.to_owned();

        Box::pin(stream::once(async move {
            let mut found = cancellable(&token, breeds.by_name(&prefix, limit)).await?;
            found.truncate(limit);
            Ok(found)
        }))
    }

    pub fn format_breed_name(breed: Option<&Breed>) -> String {
        breed.map(|b| b.name.clone()).unwrap_or_default()
    }

    /// 提交表单；表单校验由表单层负责，无效时不做任何事
    pub async fn submit(&mut self, form_valid: bool) -> AppResult<()> {
        if !form_valid {
            debug!("form is invalid, submit skipped");
            return Ok(());
        }

        let record = self.draft.to_record();
        debug!(mode = %self.mode, ?record, "submitting horse");

        let saved = match self.mode {
            ViewMode::Create => self.lifecycle.run(self.service.create(&record)).await,
            ViewMode::Edit => self.lifecycle.run(self.service.edit(&record)).await,
            ViewMode::Detail => {
                error!(mode = %self.mode, "unknown horse view mode for submit");
                return Err(AppError::UnsupportedMode(self.mode));
            }
        };

        match saved {
            Ok(saved) => {
                info!(id = ?saved.id, mode = %self.mode, "horse saved");
                let action = self.mode.completed_action().unwrap_or_default();
                self.notifier.success(&format!(
                    "Horse {} successfully {action}.",
                    self.draft.name()
                ));
                self.navigate(RoutePath::horses()).await;
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                // TODO: surface the backend's validation messages to the user
                error!(error = %err, "error saving horse");
                Err(err)
            }
        }
    }

    /// 删除当前记录；未持久化的记录不会调用删除接口
    pub async fn delete(&mut self) -> AppResult<()> {
        let id = match self.draft.require_id() {
            Ok(id) => id,
            Err(err) => {
                self.notifier.error(
                    "Something went wrong. Please reload and try again",
                    Some("Fatal Error"),
                );
                return Err(err.into());
            }
        };

        match self.lifecycle.run(self.service.delete(id)).await {
            Ok(()) => {
                self.notifier.success(&format!(
                    "Horse {} deleted successfully",
                    self.draft.name()
                ));
                self.navigate(RoutePath::horses()).await;
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                error!(%id, error = %err, "error deleting horse");
                self.notifier.error(
                    "Error deleting horse. Please try again later",
                    Some("Error"),
                );
                Err(err)
            }
        }
    }

    pub fn lifecycle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    /// 销毁组件：取消全部在途请求
    pub fn teardown(&self) {
        self.lifecycle.teardown();
    }

    async fn navigate(&self, path: RoutePath) {
        debug!(%path, "navigating");
        if let Err(err) = self.router.navigate(&path).await {
            warn!(%path, error = %err, "navigation failed");
        }
    }
}
