use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "exam.ts")]
pub struct CreateExamRequest {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub lesson_id: i64,
}

impl CreateExamRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(!self.title.trim().is_empty(), "title", "Title is required");
        errors.check(
            self.end_time > self.start_time,
            "endTime",
            "End time must be after start time",
        );
        errors.into_result()
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "exam.ts")]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub lesson_id: Option<i64>,
}

impl UpdateExamRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            errors.check(!title.trim().is_empty(), "title", "Title cannot be empty");
        }
        errors.into_result()
    }
}
