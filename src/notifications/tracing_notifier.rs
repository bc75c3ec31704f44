use async_trait::async_trait;
use tracing::info;

use super::Notifier;
use crate::errors::Result;
use crate::models::notifications::entities::NotificationEvent;

/// 只输出结构化日志的通知后端
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn emit(&self, event: NotificationEvent) -> Result<()> {
        info!(
            notification_type = %event.notification_type,
            class_id = event.audience.class_id(),
            user_id = event.audience.user_id(),
            link = event.link.as_deref(),
            meta = %event.meta,
            "{}: {}",
            event.title,
            event.message
        );
        Ok(())
    }
}
