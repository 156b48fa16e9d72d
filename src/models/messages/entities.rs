use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 站内消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "message.ts")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub subject: String,
    pub body: String,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
