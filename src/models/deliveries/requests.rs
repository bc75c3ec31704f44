use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::{Attachment, ReviewStatus};

// 学生首次提交
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDeliveryRequest {
    pub post_id: String,
    pub student_id: String,
    pub student_name: String,
    pub class_id: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub notes: Option<String>,
}

// 重新提交，未提供的字段保留原值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResubmitDeliveryPatch {
    pub attachments: Option<Vec<Attachment>>,
    pub notes: Option<String>,
}

// POST /deliveries 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDeliveryBody {
    #[serde(flatten)]
    pub input: SubmitDeliveryRequest,
    pub due_at: Option<DateTime<Utc>>,
}

// PUT /deliveries/{id} 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ResubmitDeliveryBody {
    #[serde(flatten)]
    pub patch: ResubmitDeliveryPatch,
    pub due_at: Option<DateTime<Utc>>,
}

// 批量批改请求
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDeliveriesRequest {
    pub delivery_ids: Vec<String>,
    pub review_status: ReviewStatus,
    pub review_note: Option<String>,
}

// 按学生和内容查询
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryLookupQuery {
    pub student_id: String,
    pub post_id: String,
}
