use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::DeliveryCache;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::notifications::create_notifier;
use crate::services::{DeliveryLifecycleManager, LifecycleSettings};
use crate::storage::create_storage;

pub struct StartupContext {
    pub manager: Arc<DeliveryLifecycleManager>,
}

/// 根据配置创建查询缓存，未启用时返回 None
fn create_cache(config: &AppConfig) -> Option<DeliveryCache> {
    if !config.cache.enabled {
        warn!("Delivery lookup cache disabled");
        return None;
    }
    let cache = DeliveryCache::new(&config.cache);
    warn!("Delivery lookup cache initialized");
    Some(cache)
}

/// 生产环境使用内存存储时数据不会持久化
fn volatile_storage_in_production(config: &AppConfig) -> bool {
    config.is_production() && config.database.backend == "memory"
}

/// 准备服务器启动的上下文
/// 包括存储、通知和提交流程管理器
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    if volatile_storage_in_production(config) {
        warn!("Memory storage backend in production: deliveries are lost on restart");
    }
    let storage = create_storage(&config.database).await?;
    warn!(
        "Storage backend '{}' initialized",
        config.database.backend
    );

    let notifier = create_notifier(&config.notifications, storage.notifications.clone());
    debug!(
        "Notifier backend '{}' initialized",
        config.notifications.backend
    );

    let mut manager = DeliveryLifecycleManager::new(
        storage.deliveries.clone(),
        notifier,
        LifecycleSettings::from_config(config),
    );
    if let Some(cache) = create_cache(config) {
        manager = manager.with_cache(cache);
    }

    Ok(StartupContext {
        manager: Arc::new(manager),
    })
}
