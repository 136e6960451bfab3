//! 路由表
//!
//! 将 URL 路径解析为界面（`Screen`）以及交给该界面组件的路由快照
//! （`ActivatedRoute`：静态路由数据 + 路径参数）。未知路径一律重定向到马匹列表。
//!
use crate::error::{AppError, AppResult};
use crate::view_mode::ViewMode;
use paddock_domain::error::DomainError;
use paddock_domain::{HorseId, TournamentId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 导航目标路径（按段构建）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RoutePath {
    segments: Vec<String>,
}

impl RoutePath {
    /// 解析形如 `/horses/42/edit` 的路径，忽略空段
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn segment(mut self, segment: impl fmt::Display) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn horses() -> Self {
        Self::default().segment("horses")
    }

    pub fn horse_create() -> Self {
        Self::horses().segment("create")
    }

    pub fn horse_detail(id: HorseId) -> Self {
        Self::horses().segment(id)
    }

    pub fn horse_edit(id: HorseId) -> Self {
        Self::horse_detail(id).segment("edit")
    }

    pub fn tournaments() -> Self {
        Self::default().segment("tournaments")
    }

    pub fn tournament_create() -> Self {
        Self::tournaments().segment("create")
    }

    pub fn tournament_standings(id: TournamentId) -> Self {
        Self::tournaments().segment(id).segment("standings")
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// 路由静态数据
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteData {
    pub mode: Option<ViewMode>,
}

/// 激活路由快照：静态数据 + 路径参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivatedRoute {
    pub data: RouteData,
    params: HashMap<String, String>,
}

impl ActivatedRoute {
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.data.mode = Some(mode);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn mode(&self) -> Option<ViewMode> {
        self.data.mode
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// 解析 `id` 路径参数
    pub fn id<I>(&self) -> AppResult<I>
    where
        I: FromStr<Err = DomainError>,
    {
        let raw = self
            .param("id")
            .ok_or_else(|| AppError::InvalidRoute("missing route parameter 'id'".into()))?;
        Ok(raw.parse()?)
    }
}

/// 路由对应的界面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    HorseList,
    HorseCreateEdit,
    TournamentList,
    TournamentCreate,
    TournamentStandings,
}

/// 路径解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render { screen: Screen, route: ActivatedRoute },
    Redirect(RoutePath),
}

/// 按路由表解析路径
pub fn resolve(path: &str) -> Resolution {
    let path = RoutePath::parse(path);
    let segments: Vec<&str> = path.segments().iter().map(String::as_str).collect();
    let route = ActivatedRoute::default();

    let (screen, route) = match segments.as_slice() {
        ["horses"] => (Screen::HorseList, route),
        ["horses", "create"] => (Screen::HorseCreateEdit, route.with_mode(ViewMode::Create)),
        ["horses", id, "edit"] => (
            Screen::HorseCreateEdit,
            route.with_mode(ViewMode::Edit).with_param("id", *id),
        ),
        ["horses", id] => (
            Screen::HorseCreateEdit,
            route.with_mode(ViewMode::Detail).with_param("id", *id),
        ),
        ["tournaments"] => (Screen::TournamentList, route),
        ["tournaments", "create"] => (Screen::TournamentCreate, route),
        ["tournaments", id, "standings"] => {
            (Screen::TournamentStandings, route.with_param("id", *id))
        }
        // 空路径与未知路径
        _ => return Resolution::Redirect(RoutePath::horses()),
    };

    Resolution::Render { screen, route }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(path: &str) -> (Screen, ActivatedRoute) {
        match resolve(path) {
            Resolution::Render { screen, route } => (screen, route),
            other => panic!("expected render for {path}, got {other:?}"),
        }
    }

    #[test]
    fn builds_navigation_paths() {
        assert_eq!(RoutePath::horses().to_string(), "/horses");
        assert_eq!(RoutePath::horse_edit(HorseId::new(42)).to_string(), "/horses/42/edit");
        assert_eq!(RoutePath::horse_detail(HorseId::new(7)).to_string(), "/horses/7");
        assert_eq!(
            RoutePath::tournament_standings(TournamentId::new(3)).to_string(),
            "/tournaments/3/standings"
        );
        assert_eq!(RoutePath::tournament_create().to_string(), "/tournaments/create");
        assert_eq!(RoutePath::default().to_string(), "/");
    }

    #[test]
    fn parse_ignores_empty_segments() {
        assert_eq!(RoutePath::parse("//horses/42/"), RoutePath::horse_detail(HorseId::new(42)));
    }

    #[test]
    fn horse_routes_carry_mode_and_id() {
        let (screen, route) = render("/horses/create");
        assert_eq!(screen, Screen::HorseCreateEdit);
        assert_eq!(route.mode(), Some(ViewMode::Create));
        assert_eq!(route.param("id"), None);

        let (_, route) = render("/horses/42/edit");
        assert_eq!(route.mode(), Some(ViewMode::Edit));
        assert_eq!(route.id::<HorseId>().unwrap(), HorseId::new(42));

        let (_, route) = render("/horses/42");
        assert_eq!(route.mode(), Some(ViewMode::Detail));
        assert_eq!(route.param("id"), Some("42"));
    }

    #[test]
    fn list_routes_have_no_mode() {
        assert_eq!(render("/horses").0, Screen::HorseList);
        assert_eq!(render("/tournaments").0, Screen::TournamentList);
        assert_eq!(render("/tournaments/create").0, Screen::TournamentCreate);

        let (screen, route) = render("/tournaments/5/standings");
        assert_eq!(screen, Screen::TournamentStandings);
        assert_eq!(route.id::<TournamentId>().unwrap(), TournamentId::new(5));
        assert_eq!(route.mode(), None);
    }

    #[test]
    fn empty_and_unknown_paths_redirect_to_horses() {
        for path in ["", "/", "/stables", "/horses/1/edit/extra"] {
            assert_eq!(resolve(path), Resolution::Redirect(RoutePath::horses()), "{path}");
        }
    }

    #[test]
    fn non_numeric_id_fails_to_parse() {
        let (_, route) = render("/horses/abc");
        let err = route.id::<HorseId>().unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Parse { .. })));
    }

    #[test]
    fn missing_id_is_invalid_route() {
        let err = ActivatedRoute::default().id::<HorseId>().unwrap_err();
        assert!(matches!(err, AppError::InvalidRoute(_)));
    }
}
