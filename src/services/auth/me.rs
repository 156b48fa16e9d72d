use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(principal.id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            "User retrieved successfully",
        ))),
        None => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
    }
}
