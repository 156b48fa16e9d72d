use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    // 范围外的行按不存在处理
    if storage.get_assignment(&principal, id).await?.is_none() {
        return Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"));
    }

    if storage.delete_assignment(id).await? {
        info!("Assignment {} deleted by {}", id, principal.id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted successfully")))
    } else {
        Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found"))
    }
}
