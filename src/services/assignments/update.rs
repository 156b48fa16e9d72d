use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, ensure_ordered, not_found, referenced};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
    data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(existing) = storage.get_assignment(&principal, id).await? else {
        return Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"));
    };
    data.validate()?;

    ensure_ordered(
        data.start_date.unwrap_or(existing.start_date),
        data.due_date.unwrap_or(existing.due_date),
        "dueDate",
        "Due date must be after start date",
    )?;
    if let Some(lesson_id) = data.lesson_id {
        referenced(
            storage.get_lesson(&principal, lesson_id).await?,
            "lessonId",
            "Lesson",
        )?;
    }

    match storage.update_assignment(id, data).await? {
        Some(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        None => Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
    }
}
