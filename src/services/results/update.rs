use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use super::create::assessment_lesson;
use crate::models::results::requests::UpdateResultRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, ensure_enrolled, not_found, referenced};

pub async fn update_result(
    service: &ResultService,
    request: &HttpRequest,
    id: i64,
    data: UpdateResultRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(existing) = storage.get_result(&principal, id).await? else {
        return Ok(not_found(ErrorCode::ResultNotFound, "Result not found"));
    };
    data.validate()?;

    // 换到另一份考试或作业时，学生仍须在其课程班级中
    if data.exam_id.is_some() || data.assignment_id.is_some() {
        let lesson_id =
            assessment_lesson(&storage, &principal, data.exam_id, data.assignment_id).await?;
        let lesson = referenced(
            storage.get_lesson(&principal, lesson_id).await?,
            "lessonId",
            "Lesson",
        )?;
        let student = referenced(
            storage.get_user_by_id(existing.student_id).await?,
            "studentId",
            "Student",
        )?;
        ensure_enrolled(&student, lesson.class_id)?;
    }

    match storage.update_result(id, data).await? {
        Some(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Result updated successfully",
        ))),
        None => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
    }
}
