#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Notify;

use rust_class_deliveries::errors::{DeliveryError, Result};
use rust_class_deliveries::models::deliveries::entities::Delivery;
use rust_class_deliveries::models::deliveries::requests::SubmitDeliveryRequest;
use rust_class_deliveries::models::notifications::entities::NotificationEvent;
use rust_class_deliveries::notifications::Notifier;
use rust_class_deliveries::services::{DeliveryLifecycleManager, LifecycleSettings};
use rust_class_deliveries::storage::{DeliveryStorage, MemoryStorage};

/// 记录所有通知
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn emit(&self, event: NotificationEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// 所有操作都失败的存储
pub struct FailingStorage;

fn unavailable() -> DeliveryError {
    DeliveryError::persistence("storage unavailable")
}

#[async_trait]
impl DeliveryStorage for FailingStorage {
    async fn insert_delivery(&self, _delivery: Delivery) -> Result<Delivery> {
        Err(unavailable())
    }

    async fn update_delivery(&self, _delivery: Delivery) -> Result<Option<Delivery>> {
        Err(unavailable())
    }

    async fn get_delivery_by_id(&self, _delivery_id: &str) -> Result<Option<Delivery>> {
        Err(unavailable())
    }

    async fn get_delivery_by_student_and_post(
        &self,
        _student_id: &str,
        _post_id: &str,
    ) -> Result<Option<Delivery>> {
        Err(unavailable())
    }

    async fn list_deliveries_by_post(&self, _post_id: &str) -> Result<Vec<Delivery>> {
        Err(unavailable())
    }
}

/// 内存存储，但对指定 ID 的更新失败
pub struct FlakyUpdateStorage {
    inner: MemoryStorage,
    failing_id: Mutex<Option<String>>,
}

impl FlakyUpdateStorage {
    pub fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            failing_id: Mutex::new(None),
        }
    }

    pub fn fail_updates_for(&self, delivery_id: &str) {
        *self.failing_id.lock().unwrap() = Some(delivery_id.to_string());
    }
}

#[async_trait]
impl DeliveryStorage for FlakyUpdateStorage {
    async fn insert_delivery(&self, delivery: Delivery) -> Result<Delivery> {
        self.inner.insert_delivery(delivery).await
    }

    async fn update_delivery(&self, delivery: Delivery) -> Result<Option<Delivery>> {
        let failing = self.failing_id.lock().unwrap().clone();
        if failing.as_deref() == Some(delivery.id.as_str()) {
            return Err(unavailable());
        }
        self.inner.update_delivery(delivery).await
    }

    async fn get_delivery_by_id(&self, delivery_id: &str) -> Result<Option<Delivery>> {
        self.inner.get_delivery_by_id(delivery_id).await
    }

    async fn get_delivery_by_student_and_post(
        &self,
        student_id: &str,
        post_id: &str,
    ) -> Result<Option<Delivery>> {
        self.inner
            .get_delivery_by_student_and_post(student_id, post_id)
            .await
    }

    async fn list_deliveries_by_post(&self, post_id: &str) -> Result<Vec<Delivery>> {
        self.inner.list_deliveries_by_post(post_id).await
    }
}

/// 内存存储，第一次按 (学生, 内容) 读取完成后暂停，直到 `resume` 被唤醒
pub struct PausingReadStorage {
    inner: MemoryStorage,
    paused_once: AtomicBool,
    pub read_done: Notify,
    pub resume: Notify,
}

impl PausingReadStorage {
    pub fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            paused_once: AtomicBool::new(false),
            read_done: Notify::new(),
            resume: Notify::new(),
        }
    }
}

#[async_trait]
impl DeliveryStorage for PausingReadStorage {
    async fn insert_delivery(&self, delivery: Delivery) -> Result<Delivery> {
        self.inner.insert_delivery(delivery).await
    }

    async fn update_delivery(&self, delivery: Delivery) -> Result<Option<Delivery>> {
        self.inner.update_delivery(delivery).await
    }

    async fn get_delivery_by_id(&self, delivery_id: &str) -> Result<Option<Delivery>> {
        self.inner.get_delivery_by_id(delivery_id).await
    }

    async fn get_delivery_by_student_and_post(
        &self,
        student_id: &str,
        post_id: &str,
    ) -> Result<Option<Delivery>> {
        let found = self
            .inner
            .get_delivery_by_student_and_post(student_id, post_id)
            .await?;
        if !self.paused_once.swap(true, Ordering::SeqCst) {
            self.read_done.notify_one();
            self.resume.notified().await;
        }
        Ok(found)
    }

    async fn list_deliveries_by_post(&self, post_id: &str) -> Result<Vec<Delivery>> {
        self.inner.list_deliveries_by_post(post_id).await
    }
}

pub fn manager_with(
    storage: Arc<dyn DeliveryStorage>,
) -> (DeliveryLifecycleManager, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let manager =
        DeliveryLifecycleManager::new(storage, notifier.clone(), LifecycleSettings::default());
    (manager, notifier)
}

pub fn memory_manager() -> (DeliveryLifecycleManager, Arc<RecordingNotifier>) {
    manager_with(Arc::new(MemoryStorage::new()))
}

pub fn submit_request(student_id: &str, post_id: &str) -> SubmitDeliveryRequest {
    SubmitDeliveryRequest {
        post_id: post_id.to_string(),
        student_id: student_id.to_string(),
        student_name: "Ana".to_string(),
        class_id: "c1".to_string(),
        attachments: vec![],
        notes: None,
    }
}

pub fn past() -> Option<DateTime<Utc>> {
    Some(Utc::now() - Duration::days(1))
}

pub fn future() -> Option<DateTime<Utc>> {
    Some(Utc::now() + Duration::days(1))
}
