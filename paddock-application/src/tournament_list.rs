//! 锦标赛列表与搜索组件
//!
use crate::error::AppResult;
use crate::lifecycle::LifecycleHandle;
use crate::listing::{ListConfig, ListSource, SearchForm, SearchList, non_blank};
use crate::notifier::Notifier;
use crate::tournament_service::TournamentService;
use async_trait::async_trait;
use bon::bon;
use paddock_domain::date::parse_date_filter;
use paddock_domain::{DomainResult, TournamentListing, TournamentSearch};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentSearchForm {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl SearchForm for TournamentSearchForm {
    type Search = TournamentSearch;

    fn to_search(&self) -> DomainResult<TournamentSearch> {
        Ok(TournamentSearch {
            name: non_blank(&self.name),
            start_date: parse_date_filter(self.start_date.as_deref())?,
            end_date: parse_date_filter(self.end_date.as_deref())?,
        })
    }
}

pub struct TournamentSource(Arc<dyn TournamentService>);

#[async_trait]
impl ListSource for TournamentSource {
    type Form = TournamentSearchForm;
    type Item = TournamentListing;

    const NOUN: &'static str = "tournaments";
    const FAILURE_TITLE: &'static str = "Could Not Fetch Tournaments";

    async fn fetch(&self, search: &TournamentSearch) -> AppResult<Vec<TournamentListing>> {
        self.0.search(search).await
    }
}

pub struct TournamentList {
    list: SearchList<TournamentSource>,
}

#[bon]
impl TournamentList {
    #[builder]
    pub fn new(
        service: Arc<dyn TournamentService>,
        notifier: Arc<dyn Notifier>,
        #[builder(default)] config: ListConfig,
    ) -> Self {
        Self {
            list: SearchList::new(TournamentSource(service), notifier, config),
        }
    }
}

impl TournamentList {
    pub async fn init(&mut self) -> AppResult<()> {
        self.list.init().await
    }

    pub async fn reload(&self) -> AppResult<()> {
        self.list.reload().await
    }

    pub fn search_changed(&self) {
        self.list.search_changed();
    }

    pub fn update_search(&self, edit: impl FnOnce(&mut TournamentSearchForm)) {
        self.list.update_search(edit);
    }

    pub fn search_form(&self) -> TournamentSearchForm {
        self.list.search_form()
    }

    pub fn tournaments(&self) -> Vec<TournamentListing> {
        self.list.items()
    }

    pub fn banner_error(&self) -> Option<String> {
        self.list.banner_error()
    }

    pub fn lifecycle(&self) -> LifecycleHandle {
        self.list.lifecycle()
    }

    pub fn teardown(&self) {
        self.list.teardown();
    }
}
