use serde::{Deserialize, Serialize};

// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewSubmission,      // 学生首次提交
    Resubmission,       // 学生修改后重新提交
    SubmissionReviewed, // 教师完成批改
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::NewSubmission => write!(f, "new_submission"),
            NotificationType::Resubmission => write!(f, "resubmission"),
            NotificationType::SubmissionReviewed => write!(f, "submission_reviewed"),
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_submission" => Ok(NotificationType::NewSubmission),
            "resubmission" => Ok(NotificationType::Resubmission),
            "submission_reviewed" => Ok(NotificationType::SubmissionReviewed),
            _ => Err(format!("Invalid notification type: {s}")),
        }
    }
}

// 通知面向的角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoleTarget {
    Teacher,
    Student,
}

impl std::fmt::Display for RoleTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleTarget::Teacher => write!(f, "teacher"),
            RoleTarget::Student => write!(f, "student"),
        }
    }
}

impl std::str::FromStr for RoleTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(RoleTarget::Teacher),
            "student" => Ok(RoleTarget::Student),
            _ => Err(format!("Invalid role target: {s}")),
        }
    }
}

// 接收范围：整个班级或单个用户
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "scope", content = "id", rename_all = "snake_case")]
pub enum NotificationAudience {
    Class(String),
    User(String),
}

impl NotificationAudience {
    pub fn class_id(&self) -> Option<&str> {
        match self {
            NotificationAudience::Class(id) => Some(id),
            NotificationAudience::User(_) => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            NotificationAudience::User(id) => Some(id),
            NotificationAudience::Class(_) => None,
        }
    }
}

/// 待发送的通知事件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEvent {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub role_target: Option<RoleTarget>,
    pub audience: NotificationAudience,
    pub link: Option<String>,
    pub meta: serde_json::Value,
}

/// 已持久化的通知
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub role_target: Option<RoleTarget>,
    pub audience: NotificationAudience,
    pub link: Option<String>,
    pub meta: serde_json::Value,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    pub fn from_event(
        id: i64,
        event: NotificationEvent,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            id,
            notification_type: event.notification_type,
            title: event.title,
            message: event.message,
            role_target: event.role_target,
            audience: event.audience,
            link: event.link,
            meta: event.meta,
            is_read: false,
            created_at,
        }
    }
}
