use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::{DeliveryLifecycleManager, status::is_late_at};
use crate::errors::{DeliveryError, Result};
use crate::models::deliveries::{
    entities::{Delivery, ReviewStatus},
    requests::SubmitDeliveryRequest,
};
use crate::notifications::new_submission_event;
use crate::utils::validate::validate_submit_input;

pub(super) async fn submit(
    manager: &DeliveryLifecycleManager,
    input: SubmitDeliveryRequest,
    due_at: Option<DateTime<Utc>>,
) -> Result<Delivery> {
    validate_submit_input(&input, &manager.settings.limits)?;

    // 已有提交时只能走 resubmit
    if let Some(existing) = manager
        .storage
        .get_delivery_by_student_and_post(&input.student_id, &input.post_id)
        .await?
    {
        return Err(DeliveryError::duplicate_delivery(format!(
            "学生 {} 已提交过内容 {}（提交 {}）",
            input.student_id, input.post_id, existing.id
        )));
    }

    let now = Utc::now();
    let delivery = Delivery {
        id: Uuid::new_v4().to_string(),
        post_id: input.post_id,
        student_id: input.student_id,
        student_name: input.student_name,
        class_id: input.class_id,
        attachments: input.attachments,
        notes: input.notes,
        submitted_at: now,
        review_status: ReviewStatus::Awaiting,
        review_note: None,
        reviewed_at: None,
        is_late: is_late_at(now, due_at),
    };

    let delivery = manager.storage.insert_delivery(delivery).await?;
    manager.invalidate_cached(&delivery).await;

    info!(
        delivery_id = %delivery.id,
        student_id = %delivery.student_id,
        post_id = %delivery.post_id,
        is_late = delivery.is_late,
        "Delivery submitted"
    );

    manager
        .notify(new_submission_event(
            &delivery,
            &manager.settings.post_link_prefix,
        ))
        .await;

    Ok(delivery)
}
