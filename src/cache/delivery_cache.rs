use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;
use tracing::debug;

use crate::config::CacheConfig;
use crate::models::deliveries::entities::DeliveryLookup;

/// 按 (student_id, post_id) 缓存查询结果，包括“尚未提交”
///
/// 每次失效都会推进代数。回填前先取代数，写入后再核对一次，
/// 代数变化说明读取期间有写操作提交，回填的值作废。
#[derive(Clone)]
pub struct DeliveryCache {
    inner: Cache<(String, String), DeliveryLookup>,
    generation: Arc<AtomicU64>,
}

impl DeliveryCache {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(std::time::Duration::from_secs(config.ttl_secs))
            .build();

        debug!(
            "DeliveryCache initialized with max capacity: {}, ttl: {}s",
            config.max_capacity, config.ttl_secs
        );
        Self {
            inner,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn key(student_id: &str, post_id: &str) -> (String, String) {
        (student_id.to_string(), post_id.to_string())
    }

    /// 当前代数，需在读取存储之前获取
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn get(&self, student_id: &str, post_id: &str) -> Option<DeliveryLookup> {
        let value = self.inner.get(&Self::key(student_id, post_id)).await;
        if value.is_some() {
            debug!("Cache hit for delivery lookup ({}, {})", student_id, post_id);
        } else {
            debug!("Cache miss for delivery lookup ({}, {})", student_id, post_id);
        }
        value
    }

    /// 用读取到的结果回填，代数已变化时放弃；返回是否保留在缓存中
    pub async fn fill(
        &self,
        student_id: &str,
        post_id: &str,
        lookup: DeliveryLookup,
        read_generation: u64,
    ) -> bool {
        if self.generation() != read_generation {
            debug!("Skip stale fill for delivery lookup ({}, {})", student_id, post_id);
            return false;
        }

        let key = Self::key(student_id, post_id);
        self.inner.insert(key.clone(), lookup).await;

        // 写入与失效交错时由这里撤回
        if self.generation() != read_generation {
            self.inner.invalidate(&key).await;
            debug!("Withdrew stale fill for delivery lookup ({}, {})", student_id, post_id);
            return false;
        }
        true
    }

    /// 写操作提交之后调用
    pub async fn invalidate(&self, student_id: &str, post_id: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.invalidate(&Self::key(student_id, post_id)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fill_get_invalidate() {
        let cache = DeliveryCache::new(&CacheConfig::default());
        assert!(cache.get("s1", "p1").await.is_none());

        let generation = cache.generation();
        assert!(cache.fill("s1", "p1", DeliveryLookup::Absent, generation).await);
        assert_eq!(cache.get("s1", "p1").await, Some(DeliveryLookup::Absent));
        assert!(cache.get("s1", "p2").await.is_none());

        cache.invalidate("s1", "p1").await;
        assert!(cache.get("s1", "p1").await.is_none());
    }

    #[tokio::test]
    async fn test_fill_read_before_invalidation_is_dropped() {
        let cache = DeliveryCache::new(&CacheConfig::default());

        let generation = cache.generation();
        // 读取之后、回填之前有写操作提交
        cache.invalidate("s1", "p1").await;

        assert!(!cache.fill("s1", "p1", DeliveryLookup::Absent, generation).await);
        assert!(cache.get("s1", "p1").await.is_none());

        let generation = cache.generation();
        assert!(cache.fill("s1", "p1", DeliveryLookup::Absent, generation).await);
    }
}
