use std::sync::Arc;

use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    deliveries::entities::Delivery,
    notifications::entities::{Notification, NotificationAudience, NotificationEvent},
};

pub mod memory_storage;
pub mod sea_orm_storage;

pub use memory_storage::MemoryStorage;
pub use sea_orm_storage::SeaOrmStorage;

/// 提交记录的持久化接口
///
/// 实现方只需要保证单条记录的原子性；批量操作由调用方逐条完成。
#[async_trait::async_trait]
pub trait DeliveryStorage: Send + Sync {
    // 插入新提交；(student_id, post_id) 已存在时返回 DuplicateDelivery
    async fn insert_delivery(&self, delivery: Delivery) -> Result<Delivery>;
    // 按 ID 整条覆盖；ID 不存在时返回 None
    async fn update_delivery(&self, delivery: Delivery) -> Result<Option<Delivery>>;
    // 通过ID获取提交
    async fn get_delivery_by_id(&self, delivery_id: &str) -> Result<Option<Delivery>>;
    // 获取学生对某内容的提交
    async fn get_delivery_by_student_and_post(
        &self,
        student_id: &str,
        post_id: &str,
    ) -> Result<Option<Delivery>>;
    // 列出某内容下的全部提交，按提交时间倒序
    async fn list_deliveries_by_post(&self, post_id: &str) -> Result<Vec<Delivery>>;
}

/// 通知的持久化接口
#[async_trait::async_trait]
pub trait NotificationStorage: Send + Sync {
    // 保存通知
    async fn create_notification(&self, event: NotificationEvent) -> Result<Notification>;
    // 列出某个接收范围的通知，按创建顺序
    async fn list_notifications(
        &self,
        audience: &NotificationAudience,
    ) -> Result<Vec<Notification>>;
}

/// 同一个后端同时提供两类存储
#[derive(Clone)]
pub struct StorageHandles {
    pub deliveries: Arc<dyn DeliveryStorage>,
    pub notifications: Arc<dyn NotificationStorage>,
}

impl StorageHandles {
    pub fn from_backend<S>(backend: S) -> Self
    where
        S: DeliveryStorage + NotificationStorage + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            deliveries: backend.clone(),
            notifications: backend,
        }
    }
}

/// 根据配置创建存储后端
pub async fn create_storage(config: &DatabaseConfig) -> Result<StorageHandles> {
    match config.backend.as_str() {
        "sea_orm" => {
            let storage = SeaOrmStorage::connect(config).await?;
            Ok(StorageHandles::from_backend(storage))
        }
        "memory" => Ok(StorageHandles::from_backend(MemoryStorage::new())),
        other => {
            warn!(
                "Storage backend '{}' not supported, falling back to memory storage",
                other
            );
            Ok(StorageHandles::from_backend(MemoryStorage::new()))
        }
    }
}
