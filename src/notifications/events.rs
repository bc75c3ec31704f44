//! 提交流程中各类通知的构造

use serde_json::json;

use crate::models::deliveries::entities::{Delivery, ReviewStatus};
use crate::models::notifications::entities::{
    NotificationAudience, NotificationEvent, NotificationType, RoleTarget,
};

fn post_link(link_prefix: &str, post_id: &str) -> String {
    format!("{}/{}", link_prefix.trim_end_matches('/'), post_id)
}

fn delivery_meta(delivery: &Delivery) -> serde_json::Value {
    json!({
        "post_id": delivery.post_id,
        "student_id": delivery.student_id,
        "delivery_id": delivery.id,
    })
}

/// 新提交：发给班级内的教师
pub fn new_submission_event(delivery: &Delivery, link_prefix: &str) -> NotificationEvent {
    NotificationEvent {
        notification_type: NotificationType::NewSubmission,
        title: "Nova entrega".to_string(),
        message: format!("{} enviou uma entrega.", delivery.student_name),
        role_target: Some(RoleTarget::Teacher),
        audience: NotificationAudience::Class(delivery.class_id.clone()),
        link: Some(post_link(link_prefix, &delivery.post_id)),
        meta: delivery_meta(delivery),
    }
}

/// 退回后重新提交：发给班级内的教师
pub fn resubmission_event(delivery: &Delivery, link_prefix: &str) -> NotificationEvent {
    NotificationEvent {
        notification_type: NotificationType::Resubmission,
        title: "Entrega reenviada".to_string(),
        message: format!("{} reenviou uma entrega corrigida.", delivery.student_name),
        role_target: Some(RoleTarget::Teacher),
        audience: NotificationAudience::Class(delivery.class_id.clone()),
        link: Some(post_link(link_prefix, &delivery.post_id)),
        meta: delivery_meta(delivery),
    }
}

/// 批改完成：发给提交的学生本人
pub fn review_event(delivery: &Delivery, link_prefix: &str) -> NotificationEvent {
    let (title, message) = match delivery.review_status {
        ReviewStatus::Approved => (
            "Entrega aprovada".to_string(),
            "Sua entrega foi aprovada.".to_string(),
        ),
        _ => (
            "Entrega devolvida".to_string(),
            match delivery.review_note.as_deref() {
                Some(note) => format!("Sua entrega foi devolvida: {note}"),
                None => "Sua entrega foi devolvida.".to_string(),
            },
        ),
    };

    let mut meta = delivery_meta(delivery);
    meta["review_status"] = json!(delivery.review_status);

    NotificationEvent {
        notification_type: NotificationType::SubmissionReviewed,
        title,
        message,
        role_target: Some(RoleTarget::Student),
        audience: NotificationAudience::User(delivery.student_id.clone()),
        link: Some(post_link(link_prefix, &delivery.post_id)),
        meta,
    }
}
