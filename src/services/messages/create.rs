use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MessageService;
use crate::models::messages::requests::CreateMessageRequest;
use crate::models::{ApiResponse, FieldErrors};
use crate::services::{current_principal, referenced};

pub async fn send_message(
    service: &MessageService,
    request: &HttpRequest,
    data: CreateMessageRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;

    if data.recipient_id == principal.id {
        return Err(FieldErrors::single("recipientId", "You cannot message yourself").into());
    }

    let storage = service.get_storage(request)?;
    referenced(
        storage.get_user_by_id(data.recipient_id).await?,
        "recipientId",
        "Recipient",
    )?;

    let message = storage.create_message(principal.id, data).await?;
    info!(
        "Message {} sent from {} to {}",
        message.id, message.sender_id, message.recipient_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(message, "Message sent successfully")))
}
