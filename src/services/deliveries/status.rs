use chrono::{DateTime, Utc};

use crate::models::deliveries::entities::{Delivery, DeliveryLookup, DisplayStatus, ReviewStatus};

/// 提交时间晚于截止时间即为迟交，没有截止时间则永不迟交
pub fn is_late_at(submitted_at: DateTime<Utc>, due_at: Option<DateTime<Utc>>) -> bool {
    due_at.is_some_and(|due| submitted_at > due)
}

/// 由查询结果派生展示状态
///
/// 优先级：无提交 > 已通过 > 迟交 > 批改状态本身。
pub fn compute_display_status(lookup: &DeliveryLookup) -> DisplayStatus {
    match lookup {
        DeliveryLookup::Absent => DisplayStatus::NotDelivered,
        DeliveryLookup::Present(delivery) => delivery_display_status(delivery),
    }
}

pub fn delivery_display_status(delivery: &Delivery) -> DisplayStatus {
    if delivery.review_status == ReviewStatus::Approved {
        DisplayStatus::Approved
    } else if delivery.is_late {
        DisplayStatus::Late
    } else {
        delivery.review_status.into()
    }
}
