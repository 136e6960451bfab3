//! 赛马锦标赛客户端应用层（paddock-application）
//!
//! 组件以端口（trait）与外部协作者交互：
//! - `HorseService` / `BreedService` / `TournamentService`：后端数据访问；
//! - `Router`：路由数据投递与导航；
//! - `Notifier`：成功/错误提示。
//!
//! 组件本身（`HorseCreateEdit`、`HorseList`、`TournamentList`、`TournamentCreate`、
//! `TournamentStandingsView`）只持有视图状态，
//! 所有在途请求都绑定在组件生命周期（`Lifecycle`）上，组件销毁即取消。
//!
pub mod breed_service;
pub mod config;
pub mod debounce;
pub mod error;
pub mod horse_create_edit;
pub mod horse_list;
pub mod horse_service;
pub mod inmemory_store;
pub mod lifecycle;
pub mod listing;
pub mod notifier;
pub mod router;
pub mod routing;
pub mod tournament_create;
pub mod tournament_list;
pub mod tournament_service;
pub mod tournament_standings;
pub mod view_mode;

pub use config::ClientConfig;
pub use error::{AppError, AppResult};
pub use horse_create_edit::HorseCreateEdit;
pub use horse_list::HorseList;
pub use inmemory_store::InMemoryHorseStore;
pub use tournament_create::TournamentCreate;
pub use tournament_list::TournamentList;
pub use tournament_standings::TournamentStandingsView;
pub use view_mode::ViewMode;
