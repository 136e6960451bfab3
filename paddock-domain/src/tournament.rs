//! 锦标赛记录
//!
//! - 列表与搜索：`TournamentListing`、`TournamentSearch`；
//! - 创建：`TournamentDraft`（界面编辑状态，校验后生成 `NewTournament`）；
//! - 详情与排名：`TournamentDetail`、`TournamentStandings` 与淘汰赛树 `StandingsTree`。
//!
//! 后端以定长数组返回参赛者，空位为 `null`，反序列化时直接丢弃。
//!
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::horse::HorseListing;
use crate::presence::Presence;
use crate::value_object::{HorseId, TournamentId};
use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// 每场锦标赛的参赛马匹数
pub const PARTICIPANT_COUNT: usize = 8;
/// 名称最大长度
pub const MAX_NAME_LEN: usize = 255;

/// 列表中的锦标赛
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListing {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Entity for TournamentListing {
    const NAME: &'static str = "tournament";
    type Id = TournamentId;

    fn id(&self) -> Option<TournamentId> {
        Some(self.id)
    }
}

/// 锦标赛搜索条件（序列化为查询参数）
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// 参赛马匹的选择项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseSelection {
    pub id: HorseId,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl HorseSelection {
    /// 仅已持久化的马匹可以参赛
    pub fn from_listing(listing: &HorseListing) -> Option<Self> {
        Some(Self {
            id: listing.id?,
            name: listing.name.clone(),
            date_of_birth: listing.date_of_birth,
        })
    }
}

/// 提交给后端的新锦标赛
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTournament {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participants: Vec<HorseSelection>,
}

/// 锦标赛创建表单的编辑状态
///
/// 起止日期以 `Presence` 跟踪是否已填写；参赛马匹不重复，最多 [`PARTICIPANT_COUNT`] 匹。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TournamentDraft {
    name: String,
    start_date: Presence<NaiveDate>,
    end_date: Presence<NaiveDate>,
    participants: Vec<HorseSelection>,
}

impl TournamentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date.copied()
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date.set(date);
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date.copied()
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date.set(date);
    }

    pub fn participants(&self) -> &[HorseSelection] {
        &self.participants
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= PARTICIPANT_COUNT
    }

    pub fn contains(&self, id: HorseId) -> bool {
        self.participants.iter().any(|p| p.id == id)
    }

    /// 加入一匹参赛马匹；已满或重复时拒绝
    pub fn add_participant(&mut self, horse: HorseSelection) -> DomainResult<()> {
        if self.is_full() {
            return Err(DomainError::InvalidValue {
                reason: format!("a tournament takes exactly {PARTICIPANT_COUNT} participants"),
            });
        }
        if self.contains(horse.id) {
            return Err(DomainError::InvalidValue {
                reason: format!("{} is already participating", horse.name),
            });
        }
        self.participants.push(horse);
        Ok(())
    }

    pub fn remove_participant(&mut self, id: HorseId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    /// 校验并生成提交记录；所有问题合并在一条 `InvalidValue` 中
    pub fn to_new_tournament(&self) -> DomainResult<NewTournament> {
        let mut problems = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            problems.push("No name given".to_string());
        } else if name.chars().count() > MAX_NAME_LEN {
            problems.push(format!(
                "Length of name must not exceed {MAX_NAME_LEN} characters"
            ));
        }
        let start_date = self.start_date();
        let end_date = self.end_date();
        if start_date.is_none() {
            problems.push("No start date given".to_string());
        }
        if end_date.is_none() {
            problems.push("No end date given".to_string());
        }
        if matches!((start_date, end_date), (Some(start), Some(end)) if end < start) {
            problems.push("Start date must be before end date".to_string());
        }
        if self.participants.len() != PARTICIPANT_COUNT {
            problems.push(format!(
                "Exactly {PARTICIPANT_COUNT} participants required, {} given",
                self.participants.len()
            ));
        }

        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) if problems.is_empty() => Ok(NewTournament {
                name: name.to_owned(),
                start_date,
                end_date,
                participants: self.participants.clone(),
            }),
            _ => Err(DomainError::InvalidValue {
                reason: problems.join("; "),
            }),
        }
    }
}

/// 参赛者及其晋级情况
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentParticipant {
    pub horse_id: HorseId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub entry_number: i64,
    /// 到达的轮次（首轮为 1）
    pub round_reached: i64,
}

/// 锦标赛详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetail {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, deserialize_with = "non_null")]
    pub participants: Vec<TournamentParticipant>,
}

impl TournamentDetail {
    pub fn listing(&self) -> TournamentListing {
        TournamentListing {
            id: self.id,
            name: self.name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// 当前排名（按参赛者晋级情况生成淘汰赛树）
    pub fn standings(&self) -> TournamentStandings {
        TournamentStandings {
            id: self.id,
            name: self.name.clone(),
            participants: self.participants.clone(),
            tree: StandingsTree::bracket(&self.participants),
        }
    }
}

impl Entity for TournamentDetail {
    const NAME: &'static str = "tournament";
    type Id = TournamentId;

    fn id(&self) -> Option<TournamentId> {
        Some(self.id)
    }
}

/// 锦标赛排名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStandings {
    pub id: TournamentId,
    pub name: String,
    #[serde(default, deserialize_with = "non_null")]
    pub participants: Vec<TournamentParticipant>,
    #[serde(default)]
    pub tree: Option<StandingsTree>,
}

/// 淘汰赛树
///
/// 叶子为首轮的参赛者；内部节点为从该子树晋级到这一轮的参赛者，尚未决出时为空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsTree {
    #[serde(default)]
    pub this_participant: Option<TournamentParticipant>,
    #[serde(default, deserialize_with = "non_null")]
    pub branches: Vec<StandingsTree>,
}

impl StandingsTree {
    pub fn leaf(participant: TournamentParticipant) -> Self {
        Self {
            this_participant: Some(participant),
            branches: Vec::new(),
        }
    }

    /// 按报名号两两对阵构建整棵树；没有参赛者时为 `None`
    pub fn bracket(participants: &[TournamentParticipant]) -> Option<Self> {
        let mut seeded = participants.to_vec();
        seeded.sort_by_key(|p| p.entry_number);
        (!seeded.is_empty()).then(|| Self::build(&seeded).0)
    }

    fn build(participants: &[TournamentParticipant]) -> (Self, i64) {
        if let [only] = participants {
            return (Self::leaf(only.clone()), 1);
        }

        let (left, right) = participants.split_at(participants.len() / 2);
        let (left, left_round) = Self::build(left);
        let (right, right_round) = Self::build(right);
        let round = left_round.max(right_round) + 1;
        let advanced = participants
            .iter()
            .find(|p| p.round_reached >= round)
            .cloned();

        (
            Self {
                this_participant: advanced,
                branches: vec![left, right],
            },
            round,
        )
    }

    /// 树的层数（单个叶子为 1）
    pub fn depth(&self) -> usize {
        1 + self.branches.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// 根节点上的参赛者即冠军
    pub fn winner(&self) -> Option<&TournamentParticipant> {
        self.this_participant.as_ref()
    }
}

/// 丢弃后端定长数组中的 `null` 空位
fn non_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let slots: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(slots.unwrap_or_default().into_iter().flatten().collect())
}
