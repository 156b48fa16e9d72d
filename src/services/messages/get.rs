use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn get_message(
    service: &MessageService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_message(&principal, id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            row,
            "Message retrieved successfully",
        ))),
        None => Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
    }
}
