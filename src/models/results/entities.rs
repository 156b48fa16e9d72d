use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩：考试成绩与作业成绩二选一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "result.ts")]
pub struct ExamResult {
    pub id: i64,
    pub score: f64,
    pub student_id: i64,
    pub exam_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
