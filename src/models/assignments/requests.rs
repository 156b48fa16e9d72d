use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub lesson_id: i64,
}

impl CreateAssignmentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(!self.title.trim().is_empty(), "title", "Title is required");
        errors.check(
            self.due_date > self.start_date,
            "dueDate",
            "Due date must be after start date",
        );
        errors.into_result()
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub lesson_id: Option<i64>,
}

impl UpdateAssignmentRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            errors.check(!title.trim().is_empty(), "title", "Title cannot be empty");
        }
        errors.into_result()
    }
}
