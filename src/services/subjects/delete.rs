use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_subject(&principal, id).await?.is_none() {
        return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found"));
    }

    if storage.delete_subject(id).await? {
        info!("Subject {} deleted by {}", id, principal.id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
    } else {
        Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found"))
    }
}
