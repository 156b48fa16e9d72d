use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::ApiResponse;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::services::{current_principal, referenced};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;
    let storage = service.get_storage(request)?;

    referenced(
        storage.get_lesson(&principal, data.lesson_id).await?,
        "lessonId",
        "Lesson",
    )?;

    let assignment = storage.create_assignment(data).await?;
    info!("Assignment {} created by {}", assignment.id, principal.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        assignment,
        "Assignment created successfully",
    )))
}
