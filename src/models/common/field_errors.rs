//! 字段级校验错误
//!
//! 请求体校验失败时收集所有字段的问题，一次性以 400 返回。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use ts_rs::TS;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "api.ts")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// 条件不满足时记录错误
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// 没有错误时返回 Ok
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl ResponseError for FieldErrors {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            self.0.clone(),
            "Validation failed",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_multiple_fields() {
        let mut errors = FieldErrors::new();
        errors.check(false, "name", "Name is required");
        errors.check(true, "capacity", "unused");
        errors.add("gradeLevel", "Grade level must be positive");

        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.errors()[0].field, "name");
        assert!(errors.to_string().contains("gradeLevel"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_response_is_bad_request() {
        let errors = FieldErrors::single("examId", "Exactly one of examId or assignmentId");
        assert_eq!(errors.error_response().status(), StatusCode::BAD_REQUEST);
    }
}
