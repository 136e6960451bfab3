//! 视图模式
//!
//! 由路由数据提供，决定组件可用的操作与界面文案。
//!
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Create,
    Edit,
    Detail,
}

impl ViewMode {
    pub const fn heading(self) -> &'static str {
        match self {
            ViewMode::Create => "Create New Horse",
            ViewMode::Edit => "Edit your Horse",
            ViewMode::Detail => "Details of your Horse",
        }
    }

    pub const fn submit_label(self) -> &'static str {
        match self {
            ViewMode::Create => "Create",
            ViewMode::Edit => "Edit",
            ViewMode::Detail => "Edit this Horse",
        }
    }

    /// 提交成功后提示中使用的动作词；详情模式不可提交
    pub const fn completed_action(self) -> Option<&'static str> {
        match self {
            ViewMode::Create => Some("created"),
            ViewMode::Edit => Some("edited"),
            ViewMode::Detail => None,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Create => "create",
            ViewMode::Edit => "edit",
            ViewMode::Detail => "detail",
        })
    }
}
