use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_assignment(&principal, id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            row,
            "Assignment retrieved successfully",
        ))),
        None => Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
    }
}
