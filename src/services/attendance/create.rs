use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::ApiResponse;
use crate::models::attendance::requests::CreateAttendanceRequest;
use crate::models::users::entities::UserRole;
use crate::services::{current_principal, ensure_enrolled, referenced, referenced_person};

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    data: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let student = referenced_person(
        &storage,
        &principal,
        UserRole::Student,
        data.student_id,
        "studentId",
    )
    .await?;
    let lesson = referenced(
        storage.get_lesson(&principal, data.lesson_id).await?,
        "lessonId",
        "Lesson",
    )?;
    ensure_enrolled(&student, lesson.class_id)?;

    let attendance = storage.create_attendance(data).await?;
    info!(
        "Attendance {} ({}) recorded by {}",
        attendance.id,
        if attendance.present { "present" } else { "absent" },
        principal.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        attendance,
        "Attendance recorded successfully",
    )))
}
