use chrono::{DateTime, Utc};
use tracing::info;

use super::{DeliveryLifecycleManager, status::is_late_at};
use crate::errors::{DeliveryError, Result};
use crate::models::deliveries::{
    entities::{Delivery, ReviewStatus},
    requests::ResubmitDeliveryPatch,
};
use crate::notifications::resubmission_event;
use crate::utils::validate::{validate_attachments, validate_notes};

pub(super) async fn resubmit(
    manager: &DeliveryLifecycleManager,
    delivery_id: &str,
    patch: ResubmitDeliveryPatch,
    due_at: Option<DateTime<Utc>>,
) -> Result<Delivery> {
    let mut delivery = manager
        .storage
        .get_delivery_by_id(delivery_id)
        .await?
        .ok_or_else(|| DeliveryError::not_found(format!("提交 {delivery_id} 不存在")))?;

    if !delivery
        .review_status
        .can_transition_to(ReviewStatus::Awaiting)
    {
        return Err(DeliveryError::invalid_state(format!(
            "提交 {} 当前状态为 {}，只有被退回的提交可以重新提交",
            delivery.id, delivery.review_status
        )));
    }

    // 先校验再修改
    if let Some(attachments) = &patch.attachments {
        validate_attachments(attachments, &manager.settings.limits)?;
    }
    validate_notes(patch.notes.as_deref(), &manager.settings.limits)?;

    if let Some(attachments) = patch.attachments {
        delivery.attachments = attachments;
    }
    if let Some(notes) = patch.notes {
        delivery.notes = Some(notes);
    }

    let now = Utc::now();
    delivery.submitted_at = now;
    delivery.is_late = is_late_at(now, due_at);
    delivery.review_status = ReviewStatus::Awaiting;
    delivery.review_note = None;
    delivery.reviewed_at = None;

    let delivery = manager
        .storage
        .update_delivery(delivery)
        .await?
        .ok_or_else(|| DeliveryError::not_found(format!("提交 {delivery_id} 不存在")))?;
    manager.invalidate_cached(&delivery).await;

    info!(
        delivery_id = %delivery.id,
        student_id = %delivery.student_id,
        post_id = %delivery.post_id,
        is_late = delivery.is_late,
        "Delivery resubmitted"
    );

    manager
        .notify(resubmission_event(
            &delivery,
            &manager.settings.post_link_prefix,
        ))
        .await;

    Ok(delivery)
}
