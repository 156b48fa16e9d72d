use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct Class {
    pub id: i64,
    // 班级名称
    pub name: String,
    // 年级
    pub grade_level: i32,
    // 容量
    pub capacity: i32,
    // 班主任
    pub supervisor_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
