use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;

/// 创建与更新共用
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "subject.ts")]
pub struct SubjectRequest {
    pub name: String,
}

impl SubjectRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(!self.name.trim().is_empty(), "name", "Name is required");
        errors.check(
            self.name.chars().count() <= 64,
            "name",
            "Name must be at most 64 characters",
        );
        errors.into_result()
    }
}
