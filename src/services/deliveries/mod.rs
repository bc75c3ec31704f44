//! 提交与批改流程
//!
//! 状态机：
//!
//! ```text
//! [无记录] --submit--> AGUARDANDO --review(APROVADA)--> APROVADA（终态）
//!                          |  ^
//!          review(DEVOLVIDA) |  | resubmit
//!                          v  |
//!                        DEVOLVIDA
//! ```
//!
//! `is_late` 与状态正交，只在 submit / resubmit 时重新计算。

mod lookup;
mod resubmit;
mod review;
pub mod status;
mod submit;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::cache::DeliveryCache;
use crate::config::{AppConfig, LifecycleConfig};
use crate::errors::Result;
use crate::models::deliveries::{
    entities::{Delivery, DeliveryLookup, DisplayStatus, ReviewStatus},
    requests::{ResubmitDeliveryPatch, SubmitDeliveryRequest},
    responses::PostDeliverySummary,
};
use crate::models::notifications::entities::NotificationEvent;
use crate::notifications::Notifier;
use crate::storage::DeliveryStorage;

pub use status::{compute_display_status, delivery_display_status, is_late_at};

/// 流程参数
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    pub limits: LifecycleConfig,
    pub notify_student_on_review: bool,
    pub post_link_prefix: String,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl LifecycleSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            limits: config.lifecycle.clone(),
            notify_student_on_review: config.notifications.notify_student_on_review,
            post_link_prefix: config.notifications.post_link_prefix.clone(),
        }
    }
}

/// 批量批改中单条记录的结果
#[derive(Debug)]
pub struct ReviewOutcome {
    pub delivery_id: String,
    pub result: Result<Delivery>,
}

impl ReviewOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct DeliveryLifecycleManager {
    storage: Arc<dyn DeliveryStorage>,
    notifier: Arc<dyn Notifier>,
    cache: Option<DeliveryCache>,
    settings: LifecycleSettings,
}

impl DeliveryLifecycleManager {
    pub fn new(
        storage: Arc<dyn DeliveryStorage>,
        notifier: Arc<dyn Notifier>,
        settings: LifecycleSettings,
    ) -> Self {
        Self {
            storage,
            notifier,
            cache: None,
            settings,
        }
    }

    /// 启用按 (学生, 内容) 的查询缓存
    pub fn with_cache(mut self, cache: DeliveryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// 学生首次提交
    pub async fn submit(
        &self,
        input: SubmitDeliveryRequest,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<Delivery> {
        submit::submit(self, input, due_at).await
    }

    /// 被退回后重新提交
    pub async fn resubmit(
        &self,
        delivery_id: &str,
        patch: ResubmitDeliveryPatch,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<Delivery> {
        resubmit::resubmit(self, delivery_id, patch, due_at).await
    }

    /// 批量批改，每条记录独立更新
    pub async fn review(
        &self,
        delivery_ids: &[String],
        review_status: ReviewStatus,
        review_note: Option<&str>,
    ) -> Result<Vec<ReviewOutcome>> {
        review::review(self, delivery_ids, review_status, review_note).await
    }

    /// 获取学生对某内容的提交
    pub async fn get_by_student_and_post(
        &self,
        student_id: &str,
        post_id: &str,
    ) -> Result<DeliveryLookup> {
        lookup::get_by_student_and_post(self, student_id, post_id).await
    }

    /// 通过 ID 获取提交
    pub async fn get_by_id(&self, delivery_id: &str) -> Result<Delivery> {
        lookup::get_by_id(self, delivery_id).await
    }

    /// 某内容下的提交列表与状态统计
    pub async fn list_for_post(&self, post_id: &str) -> Result<PostDeliverySummary> {
        lookup::list_for_post(self, post_id).await
    }

    /// 派生展示状态
    pub fn compute_display_status(lookup: &DeliveryLookup) -> DisplayStatus {
        compute_display_status(lookup)
    }

    // 通知失败只记录日志
    async fn notify(&self, event: NotificationEvent) {
        let notification_type = event.notification_type;
        if let Err(e) = self.notifier.emit(event).await {
            warn!("Failed to emit {} notification: {}", notification_type, e);
        }
    }

    async fn invalidate_cached(&self, delivery: &Delivery) {
        if let Some(cache) = &self.cache {
            cache
                .invalidate(&delivery.student_id, &delivery.post_id)
                .await;
        }
    }
}
