use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::LessonDay;
use crate::models::FieldErrors;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "lesson.ts")]
pub struct CreateLessonRequest {
    pub name: String,
    pub day: LessonDay,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
}

impl CreateLessonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(!self.name.trim().is_empty(), "name", "Name is required");
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
#[ts(export, export_to = "lesson.ts")]
pub struct UpdateLessonRequest {
    pub name: Option<String>,
    pub day: Option<LessonDay>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

impl UpdateLessonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            errors.check(!name.trim().is_empty(), "name", "Name cannot be empty");
        }
        errors.into_result()
    }
}
