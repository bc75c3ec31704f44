//! 内存存储实现
//!
//! 用于开发、测试以及不需要持久化的部署。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{DeliveryError, Result};
use crate::models::{
    deliveries::entities::Delivery,
    notifications::entities::{Notification, NotificationAudience, NotificationEvent},
};
use crate::storage::{DeliveryStorage, NotificationStorage};

#[derive(Default)]
pub struct MemoryStorage {
    deliveries: DashMap<String, Delivery>,
    // (student_id, post_id) -> delivery id
    pair_index: DashMap<(String, String), String>,
    notifications: DashMap<i64, Notification>,
    next_notification_id: AtomicI64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryStorage for MemoryStorage {
    async fn insert_delivery(&self, delivery: Delivery) -> Result<Delivery> {
        let key = (delivery.student_id.clone(), delivery.post_id.clone());

        // 占住索引项后再写入记录，保证同一对只有一条
        match self.pair_index.entry(key) {
            Entry::Occupied(_) => Err(DeliveryError::duplicate_delivery(format!(
                "学生 {} 已提交过内容 {}",
                delivery.student_id, delivery.post_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(delivery.id.clone());
                self.deliveries.insert(delivery.id.clone(), delivery.clone());
                Ok(delivery)
            }
        }
    }

    async fn update_delivery(&self, delivery: Delivery) -> Result<Option<Delivery>> {
        match self.deliveries.get_mut(&delivery.id) {
            Some(mut existing) => {
                // 学生和内容不可变，索引无需调整
                if existing.student_id != delivery.student_id || existing.post_id != delivery.post_id
                {
                    return Err(DeliveryError::validation(format!(
                        "提交 {} 的学生或内容不可修改",
                        delivery.id
                    )));
                }
                *existing = delivery.clone();
                Ok(Some(delivery))
            }
            None => Ok(None),
        }
    }

    async fn get_delivery_by_id(&self, delivery_id: &str) -> Result<Option<Delivery>> {
        Ok(self.deliveries.get(delivery_id).map(|d| d.value().clone()))
    }

    async fn get_delivery_by_student_and_post(
        &self,
        student_id: &str,
        post_id: &str,
    ) -> Result<Option<Delivery>> {
        let key = (student_id.to_string(), post_id.to_string());
        let Some(delivery_id) = self.pair_index.get(&key).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        Ok(self.deliveries.get(&delivery_id).map(|d| d.value().clone()))
    }

    async fn list_deliveries_by_post(&self, post_id: &str) -> Result<Vec<Delivery>> {
        let mut items: Vec<Delivery> = self
            .deliveries
            .iter()
            .filter(|d| d.post_id == post_id)
            .map(|d| d.value().clone())
            .collect();
        items.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(items)
    }
}

#[async_trait]
impl NotificationStorage for MemoryStorage {
    async fn create_notification(&self, event: NotificationEvent) -> Result<Notification> {
        let id = self.next_notification_id.fetch_add(1, Ordering::SeqCst) + 1;
        let notification = Notification::from_event(id, event, chrono::Utc::now());
        self.notifications.insert(id, notification.clone());
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        audience: &NotificationAudience,
    ) -> Result<Vec<Notification>> {
        let mut items: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| &n.audience == audience)
            .map(|n| n.value().clone())
            .collect();
        items.sort_by_key(|n| n.id);
        Ok(items)
    }
}
