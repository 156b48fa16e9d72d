use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StatsService;
use crate::errors::SchoolError;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::current_principal;

/// 全校人数统计，仅管理员
pub async fn user_stats(service: &StatsService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    if principal.role != UserRole::Admin {
        return Err(SchoolError::authorization("Only administrators can view user statistics").into());
    }

    let storage = service.get_storage(request)?;
    let stats = storage.user_stats().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stats,
        "User statistics retrieved successfully",
    )))
}
