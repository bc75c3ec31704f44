use crate::config::LifecycleConfig;
use crate::errors::{DeliveryError, Result};
use crate::models::deliveries::entities::{Attachment, ReviewStatus};
use crate::models::deliveries::requests::SubmitDeliveryRequest;

fn require_field(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeliveryError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// 校验首次提交的身份字段、附件与备注
pub fn validate_submit_input(
    input: &SubmitDeliveryRequest,
    limits: &LifecycleConfig,
) -> Result<()> {
    require_field(&input.post_id, "post_id")?;
    require_field(&input.student_id, "student_id")?;
    require_field(&input.student_name, "student_name")?;
    require_field(&input.class_id, "class_id")?;
    validate_attachments(&input.attachments, limits)?;
    validate_notes(input.notes.as_deref(), limits)
}

pub fn validate_attachments(attachments: &[Attachment], limits: &LifecycleConfig) -> Result<()> {
    if attachments.len() > limits.max_attachments {
        return Err(DeliveryError::validation(format!(
            "at most {} attachments are allowed, got {}",
            limits.max_attachments,
            attachments.len()
        )));
    }
    for (index, attachment) in attachments.iter().enumerate() {
        if attachment.name.trim().is_empty() {
            return Err(DeliveryError::validation(format!(
                "attachment #{index} has an empty name"
            )));
        }
        if attachment.url.trim().is_empty() {
            return Err(DeliveryError::validation(format!(
                "attachment '{}' has an empty url",
                attachment.name
            )));
        }
    }
    Ok(())
}

pub fn validate_notes(notes: Option<&str>, limits: &LifecycleConfig) -> Result<()> {
    if let Some(notes) = notes {
        let length = notes.chars().count();
        if length > limits.max_notes_length {
            return Err(DeliveryError::validation(format!(
                "notes must be at most {} characters, got {length}",
                limits.max_notes_length
            )));
        }
    }
    Ok(())
}

/// 校验批改决定，返回去掉首尾空白后的批改意见
///
/// 退回（DEVOLVIDA）必须附带非空意见；AGUARDANDO 不是批改人可以做出的决定。
pub fn validate_review_decision(
    status: ReviewStatus,
    note: Option<&str>,
) -> Result<Option<String>> {
    if !ReviewStatus::review_decisions().contains(&status) {
        return Err(DeliveryError::validation(format!(
            "{status} is not a review decision, expected APROVADA or DEVOLVIDA"
        )));
    }

    let note = note.map(str::trim).filter(|n| !n.is_empty());
    if status == ReviewStatus::Returned && note.is_none() {
        return Err(DeliveryError::validation(
            "review_note is required when returning a delivery",
        ));
    }
    Ok(note.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubmitDeliveryRequest {
        SubmitDeliveryRequest {
            post_id: "p1".to_string(),
            student_id: "s1".to_string(),
            student_name: "Ana".to_string(),
            class_id: "c1".to_string(),
            attachments: vec![],
            notes: None,
        }
    }

    fn attachment(name: &str, url: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            size: 1024,
            mime_type: "application/pdf".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_valid_submit_input() {
        let mut input = request();
        input.attachments = vec![attachment("trabalho.pdf", "https://files/1")];
        input.notes = Some("Segue o trabalho".to_string());
        assert!(validate_submit_input(&input, &LifecycleConfig::default()).is_ok());
    }

    #[test]
    fn test_blank_identity_fields() {
        let limits = LifecycleConfig::default();
        let mut input = request();
        input.student_id = "   ".to_string();
        let err = validate_submit_input(&input, &limits).unwrap_err();
        assert_eq!(err.code(), "E004");
        assert!(err.message().contains("student_id"));

        let mut input = request();
        input.class_id = String::new();
        assert!(validate_submit_input(&input, &limits).is_err());
    }

    #[test]
    fn test_attachment_limits() {
        let limits = LifecycleConfig {
            max_attachments: 1,
            max_notes_length: 10,
        };
        let two = vec![attachment("a", "u1"), attachment("b", "u2")];
        assert!(validate_attachments(&two, &limits).is_err());
        assert!(validate_attachments(&[attachment("", "u1")], &limits).is_err());
        assert!(validate_attachments(&[attachment("a", " ")], &limits).is_err());
        assert!(validate_attachments(&[], &limits).is_ok());
    }

    #[test]
    fn test_notes_length_counts_chars() {
        let limits = LifecycleConfig {
            max_attachments: 1,
            max_notes_length: 5,
        };
        assert!(validate_notes(Some("ação!"), &limits).is_ok());
        assert!(validate_notes(Some("ações!"), &limits).is_err());
        assert!(validate_notes(None, &limits).is_ok());
    }

    #[test]
    fn test_return_requires_note() {
        assert!(validate_review_decision(ReviewStatus::Returned, None).is_err());
        assert!(validate_review_decision(ReviewStatus::Returned, Some("  ")).is_err());
        assert_eq!(
            validate_review_decision(ReviewStatus::Returned, Some(" Corrija a introdução "))
                .unwrap()
                .as_deref(),
            Some("Corrija a introdução")
        );
    }

    #[test]
    fn test_approval_note_is_optional() {
        assert_eq!(
            validate_review_decision(ReviewStatus::Approved, None).unwrap(),
            None
        );
        assert_eq!(
            validate_review_decision(ReviewStatus::Approved, Some("")).unwrap(),
            None
        );
    }

    #[test]
    fn test_awaiting_is_not_a_decision() {
        let err = validate_review_decision(ReviewStatus::Awaiting, Some("ok")).unwrap_err();
        assert_eq!(err.code(), "E004");
    }
}
