//! 命令行演示：解析一个客户端路径并渲染对应界面的视图状态
//!
//! 用法：`demo [--offline] [path]`，例如 `demo --offline /horses/2`。
//! `--offline` 使用内置示例数据，否则连接 `paddock.toml` / `PADDOCK_BACKEND_URL` 指定的后端。
//!
use anyhow::Result as AnyResult;
use paddock_application::breed_service::BreedService;
use paddock_application::horse_service::HorseService;
use paddock_application::notifier::TracingNotifier;
use paddock_application::router::HistoryRouter;
use paddock_application::routing::{ActivatedRoute, Resolution, Screen, resolve};
use paddock_application::tournament_service::TournamentService;
use paddock_application::{
    ClientConfig, HorseCreateEdit, HorseList, InMemoryHorseStore, TournamentCreate,
    TournamentList, TournamentStandingsView,
};
use paddock_domain::StandingsTree;
use paddock_domain::tournament::PARTICIPANT_COUNT;
use paddock_http::RestClient;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Services {
    horses: Arc<dyn HorseService>,
    breeds: Arc<dyn BreedService>,
    tournaments: Arc<dyn TournamentService>,
}

impl Services {
    fn offline() -> Self {
        let store = Arc::new(InMemoryHorseStore::seeded());
        Self {
            horses: store.clone(),
            breeds: store.clone(),
            tournaments: store,
        }
    }

    fn rest(config: &ClientConfig) -> AnyResult<Self> {
        let client = Arc::new(RestClient::new(config)?);
        tracing::info!(backend = %client.base_url(), "using REST backend");
        Ok(Self {
            horses: client.clone(),
            breeds: client.clone(),
            tournaments: client,
        })
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut offline = false;
    let mut path = String::from("/horses");
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--offline" => offline = true,
            other => path = other.to_owned(),
        }
    }

    let config = ClientConfig::load()?;
    let services = if offline {
        Services::offline()
    } else {
        Services::rest(&config)?
    };

    let (screen, route) = match resolve(&path) {
        Resolution::Render { screen, route } => (screen, route),
        Resolution::Redirect(target) => {
            tracing::info!(from = %path, to = %target, "redirecting");
            match resolve(&target.to_string()) {
                Resolution::Render { screen, route } => (screen, route),
                Resolution::Redirect(again) => {
                    anyhow::bail!("redirect loop at {again}");
                }
            }
        }
    };

    let router = Arc::new(HistoryRouter::new());
    match screen {
        Screen::HorseList => show_horse_list(&services, &config).await,
        Screen::HorseCreateEdit => show_horse(&services, router.clone(), &config, &route).await,
        Screen::TournamentList => show_tournament_list(&services, &config).await,
        Screen::TournamentCreate => show_tournament_create(&services, router.clone(), &config),
        Screen::TournamentStandings => {
            show_standings(&services, router.clone(), &route).await
        }
    }?;

    if let Some(current) = router.current() {
        println!("navigated to {current}");
    }
    Ok(())
}

async fn show_horse_list(services: &Services, config: &ClientConfig) -> AnyResult<()> {
    let mut list = HorseList::builder()
        .service(services.horses.clone())
        .breeds(services.breeds.clone())
        .notifier(Arc::new(TracingNotifier))
        .config(config.list_config())
        .build();

    // 失败已通过横幅与提示呈现
    let _ = list.init().await;
    if let Some(banner) = list.banner_error() {
        println!("{banner}");
    }
    for horse in list.horses() {
        let breed = horse
            .breed
            .as_ref()
            .map(|b| HorseList::format_breed_name(&b.name))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<16} {:<7} {}  {}",
            horse.id.map(|id| id.to_string()).unwrap_or_default(),
            horse.name,
            horse.sex.label(),
            horse.date_of_birth,
            breed
        );
    }
    list.teardown();
    Ok(())
}

async fn show_horse(
    services: &Services,
    router: Arc<HistoryRouter>,
    config: &ClientConfig,
    route: &ActivatedRoute,
) -> AnyResult<()> {
    let mut view = HorseCreateEdit::builder()
        .service(services.horses.clone())
        .breeds(services.breeds.clone())
        .router(router)
        .notifier(Arc::new(TracingNotifier))
        .suggestion_limit(config.suggestion_limit)
        .build();

    // 加载失败时已提示并导航回列表
    if view.init(route).await.is_err() {
        return Ok(());
    }

    println!("{}", view.heading());
    println!("  name:          {}", view.name());
    println!("  sex:           {}", view.sex_label());
    println!(
        "  breed:         {}",
        HorseCreateEdit::format_breed_name(view.breed())
    );
    println!("  date of birth: {}", display(view.date_of_birth()));
    println!("  height:        {}", display(view.height()));
    println!("  weight:        {}", display(view.weight()));
    println!("[{}]", view.submit_label());

    view.teardown();
    Ok(())
}

async fn show_tournament_list(services: &Services, config: &ClientConfig) -> AnyResult<()> {
    let mut list = TournamentList::builder()
        .service(services.tournaments.clone())
        .notifier(Arc::new(TracingNotifier))
        .config(config.list_config())
        .build();

    let _ = list.init().await;
    if let Some(banner) = list.banner_error() {
        println!("{banner}");
    }
    for tournament in list.tournaments() {
        println!(
            "{:>4}  {:<24} {} .. {}",
            tournament.id, tournament.name, tournament.start_date, tournament.end_date
        );
    }
    list.teardown();
    Ok(())
}

fn show_tournament_create(
    services: &Services,
    router: Arc<HistoryRouter>,
    config: &ClientConfig,
) -> AnyResult<()> {
    let view = TournamentCreate::builder()
        .service(services.tournaments.clone())
        .horses(services.horses.clone())
        .router(router)
        .notifier(Arc::new(TracingNotifier))
        .suggestion_limit(config.suggestion_limit)
        .build();

    println!("{}", view.heading());
    println!("  name:         {}", view.name());
    println!("  start date:   {}", display(view.start_date()));
    println!("  end date:     {}", display(view.end_date()));
    println!(
        "  participants: {}/{PARTICIPANT_COUNT}",
        view.participants().len()
    );
    for horse in view.participants() {
        println!("    {}", TournamentCreate::format_participant(Some(horse)));
    }

    view.teardown();
    Ok(())
}

async fn show_standings(
    services: &Services,
    router: Arc<HistoryRouter>,
    route: &ActivatedRoute,
) -> AnyResult<()> {
    let mut view = TournamentStandingsView::builder()
        .service(services.tournaments.clone())
        .router(router)
        .notifier(Arc::new(TracingNotifier))
        .build();

    if view.init(route).await.is_err() {
        return Ok(());
    }

    println!("{}", view.heading());
    if let Some(tree) = view.tree() {
        print_tree(&tree, 0);
    }
    view.teardown();
    Ok(())
}

fn print_tree(tree: &StandingsTree, depth: usize) {
    let name = tree
        .this_participant
        .as_ref()
        .map(|p| format!("#{} {}", p.entry_number, p.name))
        .unwrap_or_else(|| "?".into());
    println!("{:indent$}{name}", "", indent = depth * 2);
    for branch in &tree.branches {
        print_tree(branch, depth + 1);
    }
}

fn display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
