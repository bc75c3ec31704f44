//! 通知发送
//!
//! 通知是“发出即忘”的：发送失败只记录日志，不影响提交流程。

mod events;
mod storage_notifier;
mod tracing_notifier;

use std::sync::Arc;

use tracing::warn;

use crate::config::NotificationConfig;
use crate::errors::Result;
use crate::models::notifications::entities::NotificationEvent;
use crate::storage::NotificationStorage;

pub use events::{new_submission_event, resubmission_event, review_event};
pub use storage_notifier::StorageNotifier;
pub use tracing_notifier::TracingNotifier;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn emit(&self, event: NotificationEvent) -> Result<()>;
}

/// 根据配置创建通知后端
pub fn create_notifier(
    config: &NotificationConfig,
    storage: Arc<dyn NotificationStorage>,
) -> Arc<dyn Notifier> {
    match config.backend.as_str() {
        "storage" => Arc::new(StorageNotifier::new(storage)),
        "tracing" => Arc::new(TracingNotifier),
        other => {
            warn!(
                "Notification backend '{}' not supported, falling back to tracing notifier",
                other
            );
            Arc::new(TracingNotifier)
        }
    }
}
