//! 马匹列表与搜索组件
//!
//! 搜索条件变化经防抖后触发重新加载；加载失败时设置横幅错误并提示。
//!
use crate::breed_service::BreedService;
use crate::error::{AppError, AppResult};
use crate::horse_service::HorseService;
use crate::lifecycle::{LifecycleHandle, cancellable};
use crate::listing::{ListConfig, ListSource, SearchForm, SearchList, non_blank};
use crate::notifier::Notifier;
use async_trait::async_trait;
use bon::bon;
use futures_core::stream::BoxStream;
use futures_util::stream;
use paddock_domain::date::parse_date_filter;
use paddock_domain::{DomainResult, Entity, HorseListing, HorseSearch, Sex};
use std::sync::Arc;
use tracing::{error, info};

/// 搜索表单（日期以原始字符串保存）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorseSearchForm {
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub breed_name: Option<String>,
    pub born_earliest: Option<String>,
    pub born_latest: Option<String>,
}

impl SearchForm for HorseSearchForm {
    type Search = HorseSearch;

    fn to_search(&self) -> DomainResult<HorseSearch> {
        Ok(HorseSearch {
            name: non_blank(&self.name),
            sex: self.sex,
            born_earliest: parse_date_filter(self.born_earliest.as_deref())?,
            born_latest: parse_date_filter(self.born_latest.as_deref())?,
            breed_name: non_blank(&self.breed_name),
            limit: None,
        })
    }
}

/// 以马匹服务为数据源
pub struct HorseSource(Arc<dyn HorseService>);

#[async_trait]
impl ListSource for HorseSource {
    type Form = HorseSearchForm;
    type Item = HorseListing;

    const NOUN: &'static str = "horses";
    const FAILURE_TITLE: &'static str = "Could Not Fetch Horses";

    async fn fetch(&self, search: &HorseSearch) -> AppResult<Vec<HorseListing>> {
        self.0.search(search).await
    }
}

pub struct HorseList {
    list: SearchList<HorseSource>,
    breeds: Arc<dyn BreedService>,
}

#[bon]
impl HorseList {
    #[builder]
    pub fn new(
        service: Arc<dyn HorseService>,
        breeds: Arc<dyn BreedService>,
        notifier: Arc<dyn Notifier>,
        #[builder(default)] config: ListConfig,
    ) -> Self {
        Self {
            list: SearchList::new(HorseSource(service), notifier, config),
            breeds,
        }
    }
}

impl HorseList {
    /// 初始化：首次加载并启动搜索防抖
    pub async fn init(&mut self) -> AppResult<()> {
        self.list.init().await
    }

    pub async fn reload(&self) -> AppResult<()> {
        self.list.reload().await
    }

    /// 搜索条件已变化（防抖后重新加载）
    pub fn search_changed(&self) {
        self.list.search_changed();
    }

    pub fn update_search(&self, edit: impl FnOnce(&mut HorseSearchForm)) {
        self.list.update_search(edit);
    }

    pub fn search_form(&self) -> HorseSearchForm {
        self.list.search_form()
    }

    pub fn horses(&self) -> Vec<HorseListing> {
        self.list.items()
    }

    pub fn banner_error(&self) -> Option<String> {
        self.list.banner_error()
    }

    /// 删除列表中的一匹马，成功后重新加载
    pub async fn delete(&self, horse: &HorseListing) -> AppResult<()> {
        let notifier = self.list.notifier();
        let id = match horse.require_id() {
            Ok(id) => id,
            Err(err) => {
                notifier.error(
                    "Something went wrong. Please reload and try again",
                    Some("Fatal Error"),
                );
                return Err(err.into());
            }
        };

        match self.list.run(self.list.source().0.delete(id)).await {
            Ok(()) => {
                info!(%id, "horse deleted");
                notifier.success(&format!("Successfully deleted horse {}.", horse.name));
                self.reload().await
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                error!(%id, error = %err, "error deleting horse");
                notifier.error(
                    &format!(
                        "Could not delete horse {}. Please reload and try again",
                        horse.name
                    ),
                    Some("Error"),
                );
                Err(err)
            }
        }
    }

    /// 品种建议（仅名称）
    pub fn breed_suggestions(&self, input: &str) -> BoxStream<'static, AppResult<Vec<String>>> {
        let breeds = self.breeds.clone();
        let token = self.list.token();
        let limit = self.list.config().suggestion_limit;
        let prefix = input.to_owned();

        Box::pin(stream::once(async move {
            let found = cancellable(&token, breeds.by_name(&prefix, limit)).await?;
            Ok(found.into_iter().map(|b| b.name).collect())
        }))
    }

    /// 建议本身即品种名称
    pub fn format_breed_name(name: &str) -> String {
        name.to_owned()
    }

    pub fn lifecycle(&self) -> LifecycleHandle {
        self.list.lifecycle()
    }

    pub fn teardown(&self) {
        self.list.teardown();
    }
}
