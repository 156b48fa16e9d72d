use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::ResultService;
use crate::models::results::requests::CreateResultRequest;
use crate::models::users::entities::{Principal, UserRole};
use crate::models::{ApiResponse, FieldErrors};
use crate::services::{current_principal, ensure_enrolled, referenced, referenced_person};
use crate::storage::Storage;

/// 考试或作业所属课程的 ID，必须对调用者可见
pub(super) async fn assessment_lesson(
    storage: &Arc<dyn Storage>,
    principal: &Principal,
    exam_id: Option<i64>,
    assignment_id: Option<i64>,
) -> ActixResult<i64> {
    match (exam_id, assignment_id) {
        (Some(exam_id), None) => {
            let exam = referenced(storage.get_exam(principal, exam_id).await?, "examId", "Exam")?;
            Ok(exam.lesson_id)
        }
        (None, Some(assignment_id)) => {
            let assignment = referenced(
                storage.get_assignment(principal, assignment_id).await?,
                "assignmentId",
                "Assignment",
            )?;
            Ok(assignment.lesson_id)
        }
        _ => Err(FieldErrors::single(
            "examId",
            "Exactly one of examId or assignmentId must be provided",
        )
        .into()),
    }
}

pub async fn create_result(
    service: &ResultService,
    request: &HttpRequest,
    data: CreateResultRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;
    let storage = service.get_storage(request)?;

    let student = referenced_person(
        &storage,
        &principal,
        UserRole::Student,
        data.student_id,
        "studentId",
    )
    .await?;
    let lesson_id =
        assessment_lesson(&storage, &principal, data.exam_id, data.assignment_id).await?;
    let lesson = referenced(
        storage.get_lesson(&principal, lesson_id).await?,
        "lessonId",
        "Lesson",
    )?;
    ensure_enrolled(&student, lesson.class_id)?;

    let result = storage.create_result(data).await?;
    info!(
        "Result {} for student {} recorded by {}",
        result.id, result.student_id, principal.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(result, "Result created successfully")))
}
