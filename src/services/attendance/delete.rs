use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    // 范围外的行按不存在处理
    if storage.get_attendance(&principal, id).await?.is_none() {
        return Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance not found"));
    }

    if storage.delete_attendance(id).await? {
        info!("Attendance {} deleted by {}", id, principal.id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Attendance deleted successfully")))
    } else {
        Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance not found"))
    }
}
