use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_class(&principal, class_id).await? {
        Some(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class retrieved successfully",
        ))),
        None => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
    }
}
