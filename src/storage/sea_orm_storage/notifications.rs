//! 通知存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{DeliveryError, Result};
use crate::models::notifications::entities::{
    Notification, NotificationAudience, NotificationEvent,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建通知
    pub async fn create_notification_impl(&self, event: NotificationEvent) -> Result<Notification> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            notification_type: Set(event.notification_type.to_string()),
            title: Set(event.title),
            message: Set(event.message),
            role_target: Set(event.role_target.map(|r| r.to_string())),
            class_id: Set(event.audience.class_id().map(str::to_string)),
            user_id: Set(event.audience.user_id().map(str::to_string)),
            link: Set(event.link),
            meta: Set(serde_json::to_string(&event.meta)?),
            is_read: Set(false),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("创建通知失败: {e}")))?;

        result.into_notification()
    }

    /// 列出某个接收范围的通知
    pub async fn list_notifications_impl(
        &self,
        audience: &NotificationAudience,
    ) -> Result<Vec<Notification>> {
        let select = match audience {
            NotificationAudience::Class(class_id) => Notifications::find()
                .filter(Column::ClassId.eq(class_id.as_str()))
                .filter(Column::UserId.is_null()),
            NotificationAudience::User(user_id) => {
                Notifications::find().filter(Column::UserId.eq(user_id.as_str()))
            }
        };

        let results = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("查询通知列表失败: {e}")))?;

        results.into_iter().map(|m| m.into_notification()).collect()
    }
}
