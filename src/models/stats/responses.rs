use serde::Serialize;
use ts_rs::TS;

/// 人数统计
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct UserStatsResponse {
    pub admins: i64,
    pub teachers: i64,
    pub students: i64,
    pub parents: i64,
    pub classes: i64,
}

/// 单日出勤
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct AttendanceDay {
    /// YYYY-MM-DD
    pub date: String,
    pub present: i64,
    pub absent: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct AttendanceStatsResponse {
    pub from: String,
    pub to: String,
    pub days: Vec<AttendanceDay>,
}
