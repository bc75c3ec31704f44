use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Notifier;
use crate::errors::{DeliveryError, Result};
use crate::models::notifications::entities::NotificationEvent;
use crate::storage::NotificationStorage;

/// 把通知写入存储，供前端拉取
pub struct StorageNotifier {
    storage: Arc<dyn NotificationStorage>,
}

impl StorageNotifier {
    pub fn new(storage: Arc<dyn NotificationStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Notifier for StorageNotifier {
    async fn emit(&self, event: NotificationEvent) -> Result<()> {
        let notification = self
            .storage
            .create_notification(event)
            .await
            .map_err(|e| DeliveryError::notification(format!("保存通知失败: {e}")))?;
        debug!(
            "Notification {} stored ({})",
            notification.id, notification.notification_type
        );
        Ok(())
    }
}
