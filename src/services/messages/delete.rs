use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MessageService;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn delete_message(
    service: &MessageService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(message) = storage.get_message(&principal, id).await? else {
        return Ok(not_found(ErrorCode::MessageNotFound, "Message not found"));
    };
    if message.sender_id != principal.id {
        return Err(SchoolError::authorization("Only the sender can delete a message").into());
    }

    if storage.delete_message(id).await? {
        info!("Message {} deleted by {}", id, principal.id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Message deleted successfully")))
    } else {
        Ok(not_found(ErrorCode::MessageNotFound, "Message not found"))
    }
}
