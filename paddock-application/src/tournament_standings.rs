//! 锦标赛排名视图组件
//!
use crate::error::{AppError, AppResult};
use crate::lifecycle::{Lifecycle, LifecycleHandle};
use crate::notifier::Notifier;
use crate::router::Router;
use crate::routing::{ActivatedRoute, RoutePath};
use crate::tournament_service::TournamentService;
use bon::Builder;
use paddock_domain::{StandingsTree, TournamentId, TournamentParticipant, TournamentStandings};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Builder)]
pub struct TournamentStandingsView {
    service: Arc<dyn TournamentService>,
    router: Arc<dyn Router>,
    notifier: Arc<dyn Notifier>,
    #[builder(skip)]
    standings: Option<TournamentStandings>,
    #[builder(skip)]
    lifecycle: Lifecycle,
}

impl TournamentStandingsView {
    /// 按路由参数 `id` 加载排名；失败时提示并回到锦标赛列表
    pub async fn init(&mut self, route: &ActivatedRoute) -> AppResult<()> {
        let loaded = match route.id::<TournamentId>() {
            Ok(id) => {
                debug!(%id, "loading tournament standings");
                self.lifecycle.run(self.service.standings(id)).await
            }
            Err(err) => Err(err),
        };

        match loaded {
            Ok(standings) => {
                self.standings = Some(standings);
                Ok(())
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(err) => {
                warn!(error = %err, "could not load tournament standings");
                self.notifier.error(
                    "Is the backend running?",
                    Some("Unable to load tournament standings"),
                );
                let path = RoutePath::tournaments();
                if let Err(nav) = self.router.navigate(&path).await {
                    warn!(%path, error = %nav, "navigation failed");
                }
                Err(err)
            }
        }
    }

    pub fn standings(&self) -> Option<&TournamentStandings> {
        self.standings.as_ref()
    }

    pub fn heading(&self) -> String {
        match &self.standings {
            Some(s) => format!("Standings of {}", s.name),
            None => "Standings".to_owned(),
        }
    }

    pub fn participants(&self) -> &[TournamentParticipant] {
        self.standings
            .as_ref()
            .map(|s| s.participants.as_slice())
            .unwrap_or_default()
    }

    /// 后端未给出树时按参赛者报名号生成
    pub fn tree(&self) -> Option<StandingsTree> {
        let standings = self.standings.as_ref()?;
        standings
            .tree
            .clone()
            .or_else(|| StandingsTree::bracket(&standings.participants))
    }

    pub fn lifecycle(&self) -> LifecycleHandle {
        self.lifecycle.handle()
    }

    pub fn teardown(&self) {
        self.lifecycle.teardown();
    }
}
