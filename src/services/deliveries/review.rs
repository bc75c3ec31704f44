use chrono::Utc;
use tracing::{info, warn};

use super::{DeliveryLifecycleManager, ReviewOutcome};
use crate::errors::{DeliveryError, Result};
use crate::models::deliveries::entities::{Delivery, ReviewStatus};
use crate::notifications::review_event;
use crate::utils::validate::validate_review_decision;

pub(super) async fn review(
    manager: &DeliveryLifecycleManager,
    delivery_ids: &[String],
    review_status: ReviewStatus,
    review_note: Option<&str>,
) -> Result<Vec<ReviewOutcome>> {
    if delivery_ids.is_empty() {
        return Err(DeliveryError::validation("delivery_ids must not be empty"));
    }
    // 校验失败时整批都不更新
    let review_note = validate_review_decision(review_status, review_note)?;

    let mut outcomes = Vec::with_capacity(delivery_ids.len());
    for delivery_id in delivery_ids {
        let result = review_one(manager, delivery_id, review_status, review_note.clone()).await;
        if let Err(e) = &result {
            warn!("Failed to review delivery {}: {}", delivery_id, e);
        }
        outcomes.push(ReviewOutcome {
            delivery_id: delivery_id.clone(),
            result,
        });
    }

    info!(
        review_status = %review_status,
        requested = delivery_ids.len(),
        succeeded = outcomes.iter().filter(|o| o.is_success()).count(),
        "Review batch finished"
    );

    Ok(outcomes)
}

async fn review_one(
    manager: &DeliveryLifecycleManager,
    delivery_id: &str,
    review_status: ReviewStatus,
    review_note: Option<String>,
) -> Result<Delivery> {
    let mut delivery = manager
        .storage
        .get_delivery_by_id(delivery_id)
        .await?
        .ok_or_else(|| DeliveryError::not_found(format!("提交 {delivery_id} 不存在")))?;

    if !delivery.review_status.can_transition_to(review_status) {
        return Err(DeliveryError::invalid_state(format!(
            "提交 {} 当前状态为 {}，不能批改为 {}",
            delivery.id, delivery.review_status, review_status
        )));
    }

    delivery.review_status = review_status;
    delivery.review_note = review_note;
    delivery.reviewed_at = Some(Utc::now());

    let delivery = manager
        .storage
        .update_delivery(delivery)
        .await?
        .ok_or_else(|| DeliveryError::not_found(format!("提交 {delivery_id} 不存在")))?;
    manager.invalidate_cached(&delivery).await;

    if manager.settings.notify_student_on_review {
        manager
            .notify(review_event(&delivery, &manager.settings.post_link_prefix))
            .await;
    }

    Ok(delivery)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::{DeliveryLifecycleManager, LifecycleSettings, test_support::*};
    use crate::models::deliveries::entities::ReviewStatus;
    use crate::models::notifications::entities::{NotificationAudience, NotificationType};
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_batch_approve_with_partial_failure() {
        let (manager, _) = memory_manager();
        let a = manager.submit(submit_request("s1", "p1"), None).await.unwrap();
        let b = manager.submit(submit_request("s2", "p1"), None).await.unwrap();

        let ids = vec![a.id.clone(), "missing".to_string(), b.id.clone()];
        let outcomes = manager
            .review(&ids, ReviewStatus::Approved, None)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_success());
        assert_eq!(
            outcomes[1].result.as_ref().unwrap_err().code(),
            "E005"
        );
        assert!(outcomes[2].is_success());

        for id in [&a.id, &b.id] {
            let stored = manager.get_by_id(id).await.unwrap();
            assert_eq!(stored.review_status, ReviewStatus::Approved);
            assert!(stored.reviewed_at.is_some());
        }
    }

    #[tokio::test]
    async fn test_return_without_note_updates_nothing() {
        let (manager, notifier) = memory_manager();
        let a = manager.submit(submit_request("s1", "p1"), None).await.unwrap();

        let ids = vec![a.id.clone()];
        let err = manager
            .review(&ids, ReviewStatus::Returned, Some("   "))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");

        let stored = manager.get_by_id(&a.id).await.unwrap();
        assert_eq!(stored.review_status, ReviewStatus::Awaiting);
        assert_eq!(notifier.events().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let (manager, _) = memory_manager();
        let err = manager
            .review(&[], ReviewStatus::Approved, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[tokio::test]
    async fn test_approved_is_terminal() {
        let (manager, _) = memory_manager();
        let a = manager.submit(submit_request("s1", "p1"), None).await.unwrap();
        let ids = vec![a.id.clone()];
        manager
            .review(&ids, ReviewStatus::Approved, None)
            .await
            .unwrap();

        let outcomes = manager
            .review(&ids, ReviewStatus::Returned, Some("Na verdade, refaça"))
            .await
            .unwrap();
        assert_eq!(outcomes[0].result.as_ref().unwrap_err().code(), "E006");
        assert_eq!(
            manager.get_by_id(&a.id).await.unwrap().review_status,
            ReviewStatus::Approved
        );
    }

    #[tokio::test]
    async fn test_return_stores_trimmed_note_and_notifies_student() {
        let (manager, notifier) = memory_manager();
        let a = manager.submit(submit_request("s1", "p1"), None).await.unwrap();

        let ids = vec![a.id.clone()];
        let outcomes = manager
            .review(&ids, ReviewStatus::Returned, Some("  Faltou a bibliografia "))
            .await
            .unwrap();
        let returned = outcomes[0].result.as_ref().unwrap();
        assert_eq!(returned.review_status, ReviewStatus::Returned);
        assert_eq!(returned.review_note.as_deref(), Some("Faltou a bibliografia"));

        let events = notifier.events();
        let last = events.last().unwrap();
        assert_eq!(last.notification_type, NotificationType::SubmissionReviewed);
        assert_eq!(last.audience, NotificationAudience::User("s1".into()));
    }

    #[tokio::test]
    async fn test_review_notification_can_be_disabled() {
        let notifier = Arc::new(RecordingNotifier::default());
        let settings = LifecycleSettings {
            notify_student_on_review: false,
            ..LifecycleSettings::default()
        };
        let manager =
            DeliveryLifecycleManager::new(Arc::new(MemoryStorage::new()), notifier.clone(), settings);

        let a = manager.submit(submit_request("s1", "p1"), None).await.unwrap();
        let ids = vec![a.id.clone()];
        manager
            .review(&ids, ReviewStatus::Approved, None)
            .await
            .unwrap();

        let events = notifier.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].notification_type, NotificationType::NewSubmission);
    }
}
