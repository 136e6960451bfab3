//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象。这里主要承载后端分配的数值标识：
//! 标识在路由参数中以字符串出现，因此统一提供 `FromStr` 与 `Display`。
//!
use serde::{Deserialize, Serialize};

/// 为 `struct X(i64);` 形式的标识生成 `FromStr`/`Display`/`From` 实现
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let inner: i64 = s.trim().parse()?;
                ::std::result::Result::Ok(Self(inner))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// 马匹标识（后端持久化后分配）
    ///
    /// # 示例
    ///
    /// ```
    /// use paddock_domain::value_object::HorseId;
    ///
    /// let id: HorseId = "42".parse().unwrap();
    /// assert_eq!(id.value(), 42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    HorseId
);

entity_id!(
    /// 品种标识
    BreedId
);

entity_id!(
    /// 锦标赛标识
    TournamentId
);
