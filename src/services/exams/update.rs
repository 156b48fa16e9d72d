use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::exams::requests::UpdateExamRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, ensure_ordered, not_found, referenced};

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
    data: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(existing) = storage.get_exam(&principal, id).await? else {
        return Ok(not_found(ErrorCode::ExamNotFound, "Exam not found"));
    };
    data.validate()?;

    ensure_ordered(
        data.start_time.unwrap_or(existing.start_time),
        data.end_time.unwrap_or(existing.end_time),
        "endTime",
        "End time must be after start time",
    )?;
    if let Some(lesson_id) = data.lesson_id {
        referenced(
            storage.get_lesson(&principal, lesson_id).await?,
            "lessonId",
            "Lesson",
        )?;
    }

    match storage.update_exam(id, data).await? {
        Some(exam) => Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "Exam updated successfully"))),
        None => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
    }
}
