use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_class(&principal, class_id).await?.is_none() {
        return Ok(not_found(ErrorCode::ClassNotFound, "Class not found"));
    }

    if storage.delete_class(class_id).await? {
        info!("Class {} deleted by {}", class_id, principal.id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
    } else {
        Ok(not_found(ErrorCode::ClassNotFound, "Class not found"))
    }
}
