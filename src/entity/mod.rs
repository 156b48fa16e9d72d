//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod assignments;
pub mod attendances;
pub mod classes;
pub mod exams;
pub mod lessons;
pub mod messages;
pub mod results;
pub mod subjects;
pub mod users;

use chrono::{DateTime, Utc};

/// Unix 秒转 UTC 时间
pub(crate) fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}
