//! 马匹记录
//!
//! - `Horse`：与后端交换的完整记录（创建/编辑/详情）；
//! - `HorseDraft`：视图中正在编辑的记录，对出生日期、身高、体重做存在性跟踪；
//! - `HorseListing` / `HorseSearch`：列表与搜索条件。
//!
use crate::date::today;
use crate::entity::Entity;
use crate::presence::Presence;
use crate::value_object::{BreedId, HorseId};
use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 性别（后端以大写枚举名传输）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    Male,
    #[default]
    Female,
}

impl Sex {
    /// 界面显示文本
    pub const fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 品种（按名称引用与展示）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breed {
    pub id: BreedId,
    pub name: String,
}

/// 马匹完整记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    /// 持久化后由后端分配
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HorseId>,
    pub name: String,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub height: f32,
    pub weight: f32,
    #[serde(default)]
    pub breed: Option<Breed>,
}

impl Default for Horse {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            sex: Sex::default(),
            date_of_birth: today(),
            height: 0.0,
            weight: 0.0,
            breed: None,
        }
    }
}

impl Entity for Horse {
    const NAME: &'static str = "horse";
    type Id = HorseId;

    fn id(&self) -> Option<HorseId> {
        self.id
    }
}

/// 视图中正在编辑的马匹
///
/// 出生日期、身高与体重以 `Presence` 标记：读取时仅在“已提供”后返回取值，
/// 写入总是保存取值并标记为已提供。转换回 `Horse` 时，未提供的字段取结构性默认值。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HorseDraft {
    id: Option<HorseId>,
    name: String,
    sex: Sex,
    date_of_birth: Presence<NaiveDate>,
    height: Presence<f32>,
    weight: Presence<f32>,
    breed: Option<Breed>,
}

impl HorseDraft {
    /// 空白草稿（创建模式）
    pub fn new() -> Self {
        Self::default()
    }

    /// 由后端加载的记录构建草稿
    ///
    /// 出生日期/体重/身高经由各自的 setter 赋值，从而全部标记为已提供。
    pub fn loaded(horse: Horse) -> Self {
        let mut draft = Self {
            id: horse.id,
            name: horse.name,
            sex: horse.sex,
            breed: horse.breed,
            ..Self::default()
        };
        draft.set_date_of_birth(horse.date_of_birth);
        draft.set_weight(horse.weight);
        draft.set_height(horse.height);
        draft
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    pub fn breed(&self) -> Option<&Breed> {
        self.breed.as_ref()
    }

    pub fn set_breed(&mut self, breed: Option<Breed>) {
        self.breed = breed;
    }

    pub fn height(&self) -> Option<f32> {
        self.height.copied()
    }

    pub fn set_height(&mut self, height: f32) {
        self.height.set(height);
    }

    pub fn weight(&self) -> Option<f32> {
        self.weight.copied()
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight.set(weight);
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth.copied()
    }

    pub fn set_date_of_birth(&mut self, date_of_birth: NaiveDate) {
        self.date_of_birth.set(date_of_birth);
    }

    /// 生成提交给后端的记录
    pub fn to_record(&self) -> Horse {
        Horse {
            id: self.id,
            name: self.name.clone(),
            sex: self.sex,
            date_of_birth: self.date_of_birth.value_or_else(today),
            height: self.height.value_or(0.0),
            weight: self.weight.value_or(0.0),
            breed: self.breed.clone(),
        }
    }
}

impl Entity for HorseDraft {
    const NAME: &'static str = "horse";
    type Id = HorseId;

    fn id(&self) -> Option<HorseId> {
        self.id
    }
}

/// 列表中的马匹
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseListing {
    #[serde(default)]
    pub id: Option<HorseId>,
    pub name: String,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub breed: Option<Breed>,
}

impl Entity for HorseListing {
    const NAME: &'static str = "horse";
    type Id = HorseId;

    fn id(&self) -> Option<HorseId> {
        self.id
    }
}

/// 马匹搜索条件（序列化为查询参数）
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born_earliest: Option<NaiveDate>,
    // 后端查询参数名即为 bornLastest
    #[serde(rename = "bornLastest", skip_serializing_if = "Option::is_none")]
    pub born_latest: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
