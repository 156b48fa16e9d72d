use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct CreateAttendanceRequest {
    pub date: DateTime<Utc>,
    pub present: bool,
    pub student_id: i64,
    pub lesson_id: i64,
}

#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub date: Option<DateTime<Utc>>,
    pub present: Option<bool>,
}
