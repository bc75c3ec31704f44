//! 通知实体

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::errors::DeliveryError;
use crate::models::notifications::entities::{
    Notification, NotificationAudience, NotificationType, RoleTarget,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub notification_type: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub role_target: Option<String>,
    pub class_id: Option<String>,
    pub user_id: Option<String>,
    pub link: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub meta: String,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务实体
    pub fn into_notification(self) -> crate::errors::Result<Notification> {
        let audience = match (self.class_id, self.user_id) {
            (_, Some(user_id)) => NotificationAudience::User(user_id),
            (Some(class_id), None) => NotificationAudience::Class(class_id),
            (None, None) => {
                return Err(DeliveryError::serialization(format!(
                    "通知 {} 缺少接收范围",
                    self.id
                )));
            }
        };
        let role_target = self
            .role_target
            .map(|r| r.parse::<RoleTarget>())
            .transpose()
            .map_err(DeliveryError::serialization)?;
        let created_at: DateTime<Utc> = DateTime::from_timestamp_millis(self.created_at)
            .ok_or_else(|| {
                DeliveryError::serialization(format!(
                    "created_at 时间戳超出范围: {}",
                    self.created_at
                ))
            })?;

        Ok(Notification {
            id: self.id,
            notification_type: self
                .notification_type
                .parse::<NotificationType>()
                .map_err(DeliveryError::serialization)?,
            title: self.title,
            message: self.message,
            role_target,
            audience,
            link: self.link,
            meta: serde_json::from_str(&self.meta)?,
            is_read: self.is_read,
            created_at,
        })
    }
}
