//! 锦标赛创建视图组件
//!
//! 表单状态为 `TournamentDraft`；参赛马匹通过按名称搜索的建议加入，
//! 已选的马匹不再出现在建议中。提交前在本地校验，通过后调用创建接口，
//! 成功时提示并回到锦标赛列表。
//!
use crate::config::DEFAULT_SUGGESTION_LIMIT;
use crate::error::{AppError, AppResult};
use crate::horse_service::HorseService;
use crate::lifecycle::{Lifecycle, LifecycleHandle, cancellable};
use crate::notifier::Notifier;
use crate::router::Router;
use crate::routing::RoutePath;
use crate::tournament_service::TournamentService;
use bon::Builder;
use chrono::NaiveDate;
use futures_core::stream::BoxStream;
use futures_util::{future, stream};
use paddock_domain::{
    HorseId, HorseSearch, HorseSelection, TournamentDetail, TournamentDraft,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Builder)]
pub struct TournamentCreate {
    service: Arc<dyn TournamentService>,
    horses: Arc<dyn HorseService>,
    router: Arc<dyn Router>,
    notifier: Arc<dyn Notifier>,
    #[builder(default = DEFAULT_SUGGESTION_LIMIT)]
    suggestion_limit: usize,
    #[builder(skip)]
    draft: TournamentDraft,
    #[builder(skip)]
    lifecycle: Lifecycle,
}

impl TournamentCreate {
    pub fn heading(&self) -> &'static str {
        "Create Tournament"
    }

    pub fn draft(&self) -> &TournamentDraft {
        &self.draft
    }

    pub fn name(&self) -> &str {
        self.draft.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.set_name(name);
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.draft.start_date()
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.draft.set_start_date(date);
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.draft.end_date()
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.draft.set_end_date(date);
    }

    pub fn participants(&self) -> &[HorseSelection] {
        self.draft.participants()
    }

    pub fn add_participant(&mut self, horse: HorseSelection) -> AppResult<()> {
        self.draft.add_participant(horse)?;
        Ok(())
    }

    pub fn remove_participant(&mut self, id: HorseId) -> bool {
        self.draft.remove_participant(id)
    }

    /// 参赛马匹建议：空输入直接给出一次空结果；已选马匹被排除
    pub fn participant_suggestions(
        &self,
        input: &str,
    ) -> BoxStream<'static, AppResult<Vec<HorseSelection>>> {
        if input.is_empty() {
            return Box::pin(stream::once(future::ready(Ok(Vec::new()))));
        }

        let horses = self.horses.clone();
        let token = self.lifecycle.token();
        let chosen: HashSet<HorseId> = self.draft.participants().iter().map(|p| p.id).collect();
        let search = HorseSearch::builder()
            .name(input.to_owned())
            .limit(u32::try_from(self.suggestion_limit).unwrap_or(u32::MAX))
            .build();

        Box::pin(stream::once(async move {
            let found = cancellable(&token, horses.search(&search)).await?;
            Ok(found
                .iter()
                .filter_map(HorseSelection::from_listing)
                .filter(|h| !chosen.contains(&h.id))
                .collect())
        }))
    }

    pub fn format_participant(horse: Option<&HorseSelection>) -> String {
        horse
            .map(|h| format!("{} ({})", h.name, h.date_of_birth))
            .unwrap_or_default()
    }

    /// 提交：本地校验失败时提示且不调用接口
    pub async fn submit(&mut self, form_valid: bool) -> AppResult<TournamentDetail> {
        if !form_valid {
            debug!("form is invalid, submit skipped");
            return Err(AppError::Validation("form is invalid".into()));
        }

        let tournament = match self.draft.to_new_tournament() {
            Ok(tournament) => tournament,
            Err(err) => {
                debug!(error = %err, "tournament draft rejected");
                self.notifier
                    .error(&err.to_string(), Some("Invalid Tournament"));
                return Err(err.into());
            }
        };

        match self.lifecycle.run(self.service.create(&tournament)).await {
            Ok(created) => {
                info!(id = %created.id, "tournament created");
                self.notifier.success(&format!(
                    "Tournament {} successfully created.",
                    created.name
                ));
                self.navigate(RoutePath::tournaments()).await;
                Ok(created)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                error!(error = %err, "error creating tournament");
                self.notifier
                    .error(&err.to_string(), Some("Could Not Create Tournament"));
                Err(err)
            }
        }
    }

    pub fn lifecycle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    pub fn teardown(&self) {
        self.lifecycle.teardown();
    }

    async fn navigate(&self, path: RoutePath) {
        if let Err(err) = self.router.navigate(&path).await {
            warn!(%path, error = %err, "navigation failed");
        }
    }
}
