use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 批改状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    #[serde(rename = "AGUARDANDO")]
    Awaiting, // 待批改
    #[serde(rename = "APROVADA")]
    Approved, // 已通过（终态）
    #[serde(rename = "DEVOLVIDA")]
    Returned, // 已退回，待修改
}

impl ReviewStatus {
    pub const AWAITING: &'static str = "AGUARDANDO";
    pub const APPROVED: &'static str = "APROVADA";
    pub const RETURNED: &'static str = "DEVOLVIDA";

    /// 批改人可以做出的决定
    pub fn review_decisions() -> &'static [ReviewStatus] {
        &[Self::Approved, Self::Returned]
    }

    /// 是否允许从当前状态转移到目标状态
    pub fn can_transition_to(self, next: ReviewStatus) -> bool {
        matches!(
            (self, next),
            (Self::Awaiting, Self::Approved)
                | (Self::Awaiting, Self::Returned)
                | (Self::Returned, Self::Awaiting)
        )
    }
}

impl<'de> Deserialize<'de> for ReviewStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid review status: '{s}'. expected one of: AGUARDANDO, APROVADA, DEVOLVIDA"
            ))
        })
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Awaiting => write!(f, "{}", ReviewStatus::AWAITING),
            ReviewStatus::Approved => write!(f, "{}", ReviewStatus::APPROVED),
            ReviewStatus::Returned => write!(f, "{}", ReviewStatus::RETURNED),
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ReviewStatus::AWAITING => Ok(ReviewStatus::Awaiting),
            ReviewStatus::APPROVED => Ok(ReviewStatus::Approved),
            ReviewStatus::RETURNED => Ok(ReviewStatus::Returned),
            _ => Err(format!("Invalid review status: {s}")),
        }
    }
}

// 展示给界面的状态，包含未提交与迟交两种派生状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    #[serde(rename = "NAO_ENTREGUE")]
    NotDelivered,
    #[serde(rename = "AGUARDANDO")]
    Awaiting,
    #[serde(rename = "APROVADA")]
    Approved,
    #[serde(rename = "DEVOLVIDA")]
    Returned,
    #[serde(rename = "ATRASADA")]
    Late,
}

impl From<ReviewStatus> for DisplayStatus {
    fn from(status: ReviewStatus) -> Self {
        match status {
            ReviewStatus::Awaiting => DisplayStatus::Awaiting,
            ReviewStatus::Approved => DisplayStatus::Approved,
            ReviewStatus::Returned => DisplayStatus::Returned,
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DisplayStatus::NotDelivered => "NAO_ENTREGUE",
            DisplayStatus::Awaiting => ReviewStatus::AWAITING,
            DisplayStatus::Approved => ReviewStatus::APPROVED,
            DisplayStatus::Returned => ReviewStatus::RETURNED,
            DisplayStatus::Late => "ATRASADA",
        };
        write!(f, "{label}")
    }
}

/// 提交附件，保持学生提交时的顺序
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub url: String,
}

/// 学生针对某个可评分内容（活动、作业、考试）的提交记录
///
/// 每个 (student_id, post_id) 最多一条；重新提交会修改同一条记录。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Delivery {
    pub id: String,
    pub post_id: String,
    pub student_id: String,
    // 冗余存储，便于列表展示
    pub student_name: String,
    pub class_id: String,
    pub attachments: Vec<Attachment>,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub review_status: ReviewStatus,
    pub review_note: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub is_late: bool,
}

/// 按 (学生, 内容) 查询的结果
///
/// `Absent` 表示确认尚未提交，与“尚未查询”区分开。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "delivery", rename_all = "snake_case")]
pub enum DeliveryLookup {
    Absent,
    Present(Delivery),
}

impl DeliveryLookup {
    pub fn is_present(&self) -> bool {
        matches!(self, DeliveryLookup::Present(_))
    }

    pub fn as_delivery(&self) -> Option<&Delivery> {
        match self {
            DeliveryLookup::Present(delivery) => Some(delivery),
            DeliveryLookup::Absent => None,
        }
    }

    pub fn into_delivery(self) -> Option<Delivery> {
        match self {
            DeliveryLookup::Present(delivery) => Some(delivery),
            DeliveryLookup::Absent => None,
        }
    }
}

impl From<Option<Delivery>> for DeliveryLookup {
    fn from(value: Option<Delivery>) -> Self {
        match value {
            Some(delivery) => DeliveryLookup::Present(delivery),
            None => DeliveryLookup::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_status_round_trips_wire_names() {
        for status in [
            ReviewStatus::Awaiting,
            ReviewStatus::Approved,
            ReviewStatus::Returned,
        ] {
            let parsed: ReviewStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("ENTREGUE".parse::<ReviewStatus>().is_err());
    }

    #[test]
    fn test_review_status_deserialize_rejects_unknown() {
        let ok: ReviewStatus = serde_json::from_str("\"DEVOLVIDA\"").unwrap();
        assert_eq!(ok, ReviewStatus::Returned);
        assert!(serde_json::from_str::<ReviewStatus>("\"devolvida\"").is_err());
    }

    #[test]
    fn test_allowed_transitions() {
        use ReviewStatus::*;
        assert!(Awaiting.can_transition_to(Approved));
        assert!(Awaiting.can_transition_to(Returned));
        assert!(Returned.can_transition_to(Awaiting));

        assert!(!Approved.can_transition_to(Awaiting));
        assert!(!Approved.can_transition_to(Returned));
        assert!(!Returned.can_transition_to(Approved));
        assert!(!Awaiting.can_transition_to(Awaiting));
    }

    #[test]
    fn test_lookup_serializes_as_tagged_variant() {
        let json = serde_json::to_value(DeliveryLookup::Absent).unwrap();
        assert_eq!(json["state"], "absent");
        assert!(json.get("delivery").is_none());
    }

    #[test]
    fn test_display_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DisplayStatus::NotDelivered).unwrap(),
            "\"NAO_ENTREGUE\""
        );
        assert_eq!(DisplayStatus::Late.to_string(), "ATRASADA");
        assert_eq!(
            DisplayStatus::from(ReviewStatus::Returned),
            DisplayStatus::Returned
        );
    }
}
