use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::ApiResponse;
use crate::models::exams::requests::CreateExamRequest;
use crate::services::{current_principal, referenced};

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    data: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;
    let storage = service.get_storage(request)?;

    // 教师只能为自己任教的课程安排考试
    referenced(
        storage.get_lesson(&principal, data.lesson_id).await?,
        "lessonId",
        "Lesson",
    )?;

    let exam = storage.create_exam(data).await?;
    info!("Exam {} created by {}", exam.id, principal.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(exam, "Exam created successfully")))
}
