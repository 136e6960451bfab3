//! 字段“未提供 / 已提供”标记
//!
//! 记录中的部分字段（出生日期、身高、体重）存在合法的结构性默认值（今天、0、0），
//! 界面需要区分“用户尚未填写”与“明确填写为 0 / 今天”。
//! `Presence<T>` 以显式的标签表达这一区别，而不依赖隐藏的布尔标记。
//!

/// 字段取值的存在性标签
///
/// 生命周期：初始为 `Unset`；一旦赋值即为 `Provided`，不提供回退到 `Unset` 的操作。
///
/// # 示例
///
/// ```
/// use paddock_domain::presence::Presence;
///
/// let mut height: Presence<f32> = Presence::default();
/// assert_eq!(height.get(), None);
///
/// height.set(0.0);
/// assert_eq!(height.get(), Some(&0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence<T> {
    /// 尚未提供
    Unset,
    /// 已明确提供（可以是结构性默认值本身）
    Provided(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Presence<T> {
    pub fn is_provided(&self) -> bool {
        matches!(self, Self::Provided(_))
    }

    /// 已提供时返回取值，否则为 `None`
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Provided(value) => Some(value),
            Self::Unset => None,
        }
    }

    /// 赋值并标记为已提供
    pub fn set(&mut self, value: T) {
        *self = Self::Provided(value);
    }

    /// 取值；未提供时回退到结构性默认值
    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Provided(value) => value,
            Self::Unset => default,
        }
    }

    pub fn value_or_else(self, default: impl FnOnce() -> T) -> T {
        match self {
            Self::Provided(value) => value,
            Self::Unset => default(),
        }
    }
}

impl<T: Copy> Presence<T> {
    pub fn copied(&self) -> Option<T> {
        self.get().copied()
    }
}

impl<T> From<T> for Presence<T> {
    fn from(value: T) -> Self {
        Self::Provided(value)
    }
}
