use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn mark_read(
    service: &MessageService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(message) = storage.get_message(&principal, id).await? else {
        return Ok(not_found(ErrorCode::MessageNotFound, "Message not found"));
    };
    if message.recipient_id != principal.id {
        return Err(SchoolError::authorization("Only the recipient can mark a message as read").into());
    }

    match storage.mark_message_read(id).await? {
        Some(message) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            message,
            "Message marked as read",
        ))),
        None => Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
    }
}
