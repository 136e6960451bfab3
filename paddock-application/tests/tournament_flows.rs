mod common;

use anyhow::Result as AnyResult;
use chrono::NaiveDate;
use common::{SpyHorseService, SpyNotifier, SpyRouter, SpyTournamentService, listing, sample_horse};
use futures_util::StreamExt;
use paddock_application::routing::{ActivatedRoute, RoutePath};
use paddock_application::{AppError, TournamentCreate, TournamentStandingsView};
use paddock_domain::error::DomainError;
use paddock_domain::{
    HorseId, HorseSelection, StandingsTree, TournamentId, TournamentParticipant,
    TournamentStandings,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn selection(id: i64) -> HorseSelection {
    HorseSelection {
        id: HorseId::new(id),
        name: format!("Horse {id}"),
        date_of_birth: NaiveDate::from_ymd_opt(2014, 3, 1).unwrap(),
    }
}

struct Harness {
    service: Arc<SpyTournamentService>,
    horses: Arc<SpyHorseService>,
    router: Arc<SpyRouter>,
    notifier: Arc<SpyNotifier>,
}

impl Harness {
    fn new(service: SpyTournamentService) -> Self {
        Self {
            service: Arc::new(service),
            horses: Arc::new(SpyHorseService::default()),
            router: Arc::new(SpyRouter::default()),
            notifier: Arc::new(SpyNotifier::default()),
        }
    }

    fn create_view(&self) -> TournamentCreate {
        TournamentCreate::builder()
            .service(self.service.clone())
            .horses(self.horses.clone())
            .router(self.router.clone())
            .notifier(self.notifier.clone())
            .suggestion_limit(5)
            .build()
    }

    fn standings_view(&self) -> TournamentStandingsView {
        TournamentStandingsView::builder()
            .service(self.service.clone())
            .router(self.router.clone())
            .notifier(self.notifier.clone())
            .build()
    }
}

fn filled(view: &mut TournamentCreate) -> AnyResult<()> {
    view.set_name("Autumn Derby");
    view.set_start_date(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
    view.set_end_date(NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
    for id in 1..=8 {
        view.add_participant(selection(id))?;
    }
    Ok(())
}

#[tokio::test]
async fn create_submits_and_returns_to_tournaments() -> AnyResult<()> {
    let harness = Harness::new(SpyTournamentService::default());
    let mut view = harness.create_view();
    filled(&mut view)?;

    let created = view.submit(true).await?;

    assert_eq!(created.id, TournamentId::new(10));
    assert_eq!(created.participants.len(), 8);
    let sent = harness.service.created();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "Autumn Derby");
    assert_eq!(
        harness.notifier.successes(),
        vec!["Tournament Autumn Derby successfully created.".to_string()]
    );
    assert_eq!(harness.router.visited(), vec![RoutePath::tournaments()]);
    Ok(())
}

#[tokio::test]
async fn incomplete_draft_is_rejected_locally() -> AnyResult<()> {
    let harness = Harness::new(SpyTournamentService::default());
    let mut view = harness.create_view();
    view.set_name("Autumn Derby");
    view.add_participant(selection(1))?;

    let err = view.submit(true).await.unwrap_err();

    assert!(matches!(err, AppError::Domain(DomainError::InvalidValue { .. })));
    assert!(harness.service.created().is_empty());
    let errors = harness.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].0.contains("No start date given"));
    assert_eq!(errors[0].1.as_deref(), Some("Invalid Tournament"));
    assert!(harness.router.visited().is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_create_stays_on_page() -> AnyResult<()> {
    let harness = Harness::new(SpyTournamentService {
        fail: true,
        ..Default::default()
    });
    let mut view = harness.create_view();
    filled(&mut view)?;

    let err = view.submit(true).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        harness.notifier.errors()[0].1.as_deref(),
        Some("Could Not Create Tournament")
    );
    assert!(harness.router.visited().is_empty());
    assert_eq!(view.participants().len(), 8);
    Ok(())
}

#[tokio::test]
async fn invalid_form_is_not_submitted() {
    let harness = Harness::new(SpyTournamentService::default());
    let mut view = harness.create_view();

    assert!(view.submit(false).await.is_err());
    assert!(harness.service.created().is_empty());
    assert!(harness.notifier.notices().is_empty());
}

#[tokio::test]
async fn suggestions_skip_chosen_horses() -> AnyResult<()> {
    let harness = Harness::new(SpyTournamentService::default());
    harness.horses.set_listed(vec![
        listing(&sample_horse(1, "Wendy")),
        listing(&sample_horse(2, "Wenzel")),
    ]);
    let mut view = harness.create_view();
    view.add_participant(selection(1))?;

    let found = view
        .participant_suggestions("Wen")
        .next()
        .await
        .transpose()?
        .unwrap_or_default();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Wenzel");
    let searches = harness.horses.searches.lock().unwrap().clone();
    assert_eq!(searches[0].name.as_deref(), Some("Wen"));
    assert_eq!(searches[0].limit, Some(5));
    Ok(())
}

#[tokio::test]
async fn empty_suggestion_input_skips_search() -> AnyResult<()> {
    let harness = Harness::new(SpyTournamentService::default());
    let view = harness.create_view();

    let found: Vec<_> = view.participant_suggestions("").collect().await;

    assert_eq!(found.len(), 1);
    assert!(found[0].as_ref().is_ok_and(Vec::is_empty));
    assert_eq!(harness.horses.search_count(), 0);
    Ok(())
}

fn participant(entry: i64, round: i64) -> TournamentParticipant {
    TournamentParticipant {
        horse_id: HorseId::new(entry),
        name: format!("Horse {entry}"),
        date_of_birth: NaiveDate::from_ymd_opt(2014, 3, 1).unwrap(),
        entry_number: entry,
        round_reached: round,
    }
}

#[tokio::test]
async fn standings_load_and_build_missing_tree() -> AnyResult<()> {
    let mut participants: Vec<_> = (1..=8).map(|e| participant(e, 1)).collect();
    participants[5].round_reached = 4;
    let harness = Harness::new(SpyTournamentService {
        standings: Some(TournamentStandings {
            id: TournamentId::new(3),
            name: "Spring Cup".into(),
            participants,
            tree: None,
        }),
        ..Default::default()
    });
    let mut view = harness.standings_view();

    view.init(&ActivatedRoute::default().with_param("id", "3")).await?;

    assert_eq!(view.heading(), "Standings of Spring Cup");
    assert_eq!(view.participants().len(), 8);
    let tree = view.tree().expect("tree");
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.winner().map(|p| p.entry_number), Some(6));
    assert!(harness.notifier.notices().is_empty());
    Ok(())
}

#[tokio::test]
async fn standings_prefer_backend_tree() -> AnyResult<()> {
    let only = participant(1, 1);
    let harness = Harness::new(SpyTournamentService {
        standings: Some(TournamentStandings {
            id: TournamentId::new(3),
            name: "Spring Cup".into(),
            participants: vec![only.clone()],
            tree: Some(StandingsTree::leaf(only)),
        }),
        ..Default::default()
    });
    let mut view = harness.standings_view();

    view.init(&ActivatedRoute::default().with_param("id", "3")).await?;

    assert_eq!(view.tree().map(|t| t.depth()), Some(1));
    Ok(())
}

#[tokio::test]
async fn standings_failure_returns_to_tournaments() {
    let harness = Harness::new(SpyTournamentService {
        fail: true,
        ..Default::default()
    });
    let mut view = harness.standings_view();

    let err = view
        .init(&ActivatedRoute::default().with_param("id", "3"))
        .await
        .unwrap_err();

    assert!(err.is_unreachable());
    assert!(view.standings().is_none());
    assert_eq!(view.heading(), "Standings");
    assert_eq!(
        harness.notifier.errors(),
        vec![(
            "Is the backend running?".to_string(),
            Some("Unable to load tournament standings".to_string())
        )]
    );
    assert_eq!(harness.router.visited(), vec![RoutePath::tournaments()]);
}

#[tokio::test]
async fn standings_with_bad_id_never_call_service() {
    let harness = Harness::new(SpyTournamentService::default());
    let mut view = harness.standings_view();

    let err = view
        .init(&ActivatedRoute::default().with_param("id", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Domain(DomainError::Parse { .. })));
    assert_eq!(harness.service.standings_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.router.visited(), vec![RoutePath::tournaments()]);
}
