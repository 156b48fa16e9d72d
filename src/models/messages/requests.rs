use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 10_000;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "message.ts")]
pub struct CreateMessageRequest {
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
}

impl CreateMessageRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let subject = self.subject.trim();
        errors.check(!subject.is_empty(), "subject", "Subject is required");
        errors.check(
            subject.chars().count() <= MAX_SUBJECT_LENGTH,
            "subject",
            "Subject must be at most 200 characters",
        );
        errors.check(!self.body.trim().is_empty(), "body", "Body is required");
        errors.check(
            self.body.chars().count() <= MAX_BODY_LENGTH,
            "body",
            "Body must be at most 10000 characters",
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_and_body_required() {
        let req = CreateMessageRequest {
            recipient_id: 2,
            subject: "  ".to_string(),
            body: String::new(),
        };
        let errors = req.validate().unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["subject", "body"]);
    }
}
