use super::{DeliveryLifecycleManager, status::delivery_display_status};
use crate::errors::{DeliveryError, Result};
use crate::models::deliveries::{
    entities::{Delivery, DeliveryLookup},
    responses::{DisplayStatusCounts, PostDeliverySummary},
};

pub(super) async fn get_by_student_and_post(
    manager: &DeliveryLifecycleManager,
    student_id: &str,
    post_id: &str,
) -> Result<DeliveryLookup> {
    let Some(cache) = &manager.cache else {
        return Ok(manager
            .storage
            .get_delivery_by_student_and_post(student_id, post_id)
            .await?
            .into());
    };

    if let Some(lookup) = cache.get(student_id, post_id).await {
        return Ok(lookup);
    }

    // 代数必须在读取存储之前获取
    let generation = cache.generation();
    let lookup: DeliveryLookup = manager
        .storage
        .get_delivery_by_student_and_post(student_id, post_id)
        .await?
        .into();

    cache
        .fill(student_id, post_id, lookup.clone(), generation)
        .await;
    Ok(lookup)
}

pub(super) async fn get_by_id(
    manager: &DeliveryLifecycleManager,
    delivery_id: &str,
) -> Result<Delivery> {
    manager
        .storage
        .get_delivery_by_id(delivery_id)
        .await?
        .ok_or_else(|| DeliveryError::not_found(format!("提交 {delivery_id} 不存在")))
}

pub(super) async fn list_for_post(
    manager: &DeliveryLifecycleManager,
    post_id: &str,
) -> Result<PostDeliverySummary> {
    let items = manager.storage.list_deliveries_by_post(post_id).await?;

    let mut counts = DisplayStatusCounts::default();
    for delivery in &items {
        counts.record(delivery_display_status(delivery));
    }

    Ok(PostDeliverySummary {
        post_id: post_id.to_string(),
        items,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::*;
    use crate::cache::DeliveryCache;
    use crate::config::CacheConfig;
    use crate::models::deliveries::entities::{DeliveryLookup, DisplayStatus, ReviewStatus};
    use crate::services::DeliveryLifecycleManager;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_lookup_absent_then_present() {
        let (manager, _) = memory_manager();
        let lookup = manager.get_by_student_and_post("s1", "p1").await.unwrap();
        assert_eq!(lookup, DeliveryLookup::Absent);
        assert_eq!(
            DeliveryLifecycleManager::compute_display_status(&lookup),
            DisplayStatus::NotDelivered
        );

        let delivery = manager.submit(submit_request("s1", "p1"), None).await.unwrap();
        let lookup = manager.get_by_student_and_post("s1", "p1").await.unwrap();
        assert_eq!(lookup.as_delivery(), Some(&delivery));
    }

    #[tokio::test]
    async fn test_cached_lookup_is_invalidated_by_writes() {
        let notifier = Arc::new(RecordingNotifier::default());
        let manager = manager_with(Arc::new(MemoryStorage::new()), notifier)
            .with_cache(DeliveryCache::new(&CacheConfig::default()));

        // 缓存“尚未提交”
        assert!(
            !manager
                .get_by_student_and_post("s1", "p1")
                .await
                .unwrap()
                .is_present()
        );

        let delivery = manager.submit(submit_request("s1", "p1"), None).await.unwrap();
        let lookup = manager.get_by_student_and_post("s1", "p1").await.unwrap();
        assert_eq!(lookup.as_delivery().map(|d| d.id.as_str()), Some(delivery.id.as_str()));

        let ids = vec![delivery.id.clone()];
        manager
            .review(&ids, ReviewStatus::Approved, None)
            .await
            .unwrap();
        let lookup = manager.get_by_student_and_post("s1", "p1").await.unwrap();
        assert_eq!(
            lookup.as_delivery().map(|d| d.review_status),
            Some(ReviewStatus::Approved)
        );
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let (manager, _) = memory_manager();
        let err = manager.get_by_id("missing").await.unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_list_for_post_counts_display_statuses() {
        let (manager, _) = memory_manager();
        let a = manager.submit(submit_request("s1", "p1"), None).await.unwrap();
        manager.submit(submit_request("s2", "p1"), past()).await.unwrap();
        manager.submit(submit_request("s3", "p1"), None).await.unwrap();
        manager.submit(submit_request("s1", "p2"), None).await.unwrap();

        let ids = vec![a.id.clone()];
        manager
            .review(&ids, ReviewStatus::Approved, None)
            .await
            .unwrap();

        let summary = manager.list_for_post("p1").await.unwrap();
        assert_eq!(summary.post_id, "p1");
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.counts.approved, 1);
        assert_eq!(summary.counts.late, 1);
        assert_eq!(summary.counts.awaiting, 1);
        assert_eq!(summary.counts.returned, 0);
        assert_eq!(summary.counts.total(), 3);
        assert!(summary.items.iter().all(|d| d.post_id == "p1"));
    }
}
