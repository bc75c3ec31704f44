//! 提交实体

use chrono::{DateTime, Utc};
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::errors::DeliveryError;
use crate::models::deliveries::entities::{Attachment, Delivery, ReviewStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "deliveries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub post_id: String,
    pub student_id: String,
    pub student_name: String,
    pub class_id: String,
    // JSON 数组，保持提交顺序
    #[sea_orm(column_type = "Text")]
    pub attachments: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    // 毫秒时间戳
    pub submitted_at: i64,
    pub review_status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_note: Option<String>,
    pub reviewed_at: Option<i64>,
    pub is_late: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn millis_to_datetime(column: &str, millis: i64) -> crate::errors::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        DeliveryError::serialization(format!("{column} 时间戳超出范围: {millis}"))
    })
}

impl Model {
    /// 转换为业务实体
    pub fn into_delivery(self) -> crate::errors::Result<Delivery> {
        let attachments: Vec<Attachment> = serde_json::from_str(&self.attachments)?;
        let review_status: ReviewStatus = self
            .review_status
            .parse()
            .map_err(DeliveryError::serialization)?;
        let reviewed_at = self
            .reviewed_at
            .map(|ms| millis_to_datetime("reviewed_at", ms))
            .transpose()?;

        Ok(Delivery {
            submitted_at: millis_to_datetime("submitted_at", self.submitted_at)?,
            id: self.id,
            post_id: self.post_id,
            student_id: self.student_id,
            student_name: self.student_name,
            class_id: self.class_id,
            attachments,
            notes: self.notes,
            review_status,
            review_note: self.review_note,
            reviewed_at,
            is_late: self.is_late,
        })
    }
}

impl ActiveModel {
    /// 从业务实体构建，所有列均标记为已设置
    pub fn from_delivery(delivery: &Delivery) -> crate::errors::Result<Self> {
        Ok(Self {
            id: Set(delivery.id.clone()),
            post_id: Set(delivery.post_id.clone()),
            student_id: Set(delivery.student_id.clone()),
            student_name: Set(delivery.student_name.clone()),
            class_id: Set(delivery.class_id.clone()),
            attachments: Set(serde_json::to_string(&delivery.attachments)?),
            notes: Set(delivery.notes.clone()),
            submitted_at: Set(delivery.submitted_at.timestamp_millis()),
            review_status: Set(delivery.review_status.to_string()),
            review_note: Set(delivery.review_note.clone()),
            reviewed_at: Set(delivery.reviewed_at.map(|dt| dt.timestamp_millis())),
            is_late: Set(delivery.is_late),
        })
    }
}
