pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod exams;
pub mod lessons;
pub mod messages;
pub mod people;
pub mod results;
pub mod stats;
pub mod subjects;

#[cfg(test)]
mod tests;

pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use exams::ExamService;
pub use lessons::LessonService;
pub use messages::MessageService;
pub use people::PersonService;
pub use results::ResultService;
pub use stats::StatsService;
pub use subjects::SubjectService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::SchoolError;
use crate::middlewares::RequireSession;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors,
    users::entities::{Principal, User, UserRole},
};
use crate::storage::Storage;

pub(crate) fn storage_from_request(
    request: &HttpRequest,
) -> Result<Arc<dyn Storage>, SchoolError> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| SchoolError::internal("存储未注册到 app data"))
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 当前调用者，由 RequireSession 写入
pub(crate) fn current_principal(request: &HttpRequest) -> Result<Principal, SchoolError> {
    RequireSession::extract_principal(request)
        .ok_or_else(|| SchoolError::authentication("Authentication required"))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

/// 被引用的行必须存在且对调用者可见，否则记为字段错误
pub(crate) fn referenced<T>(row: Option<T>, field: &str, what: &str) -> Result<T, FieldErrors> {
    row.ok_or_else(|| {
        FieldErrors::single(field, format!("{what} does not exist or is not accessible"))
    })
}

/// 调用者可见、且角色匹配的人员
pub(crate) async fn referenced_person(
    storage: &Arc<dyn Storage>,
    principal: &Principal,
    role: UserRole,
    id: i64,
    field: &str,
) -> actix_web::Result<User> {
    let person = storage.get_person(principal, role, id).await?;
    let what = match role {
        UserRole::Admin => "Admin",
        UserRole::Teacher => "Teacher",
        UserRole::Student => "Student",
        UserRole::Parent => "Parent",
    };
    Ok(referenced(person, field, what)?)
}

/// 学生必须在课程所属班级中
pub(crate) fn ensure_enrolled(student: &User, class_id: i64) -> Result<(), FieldErrors> {
    if student.class_id == Some(class_id) {
        Ok(())
    } else {
        Err(FieldErrors::single(
            "studentId",
            "Student is not enrolled in the lesson's class",
        ))
    }
}

/// 结束时间必须晚于开始时间
pub(crate) fn ensure_ordered<T: PartialOrd>(
    start: T,
    end: T,
    field: &str,
    message: &str,
) -> Result<(), FieldErrors> {
    if end > start {
        Ok(())
    } else {
        Err(FieldErrors::single(field, message))
    }
}
