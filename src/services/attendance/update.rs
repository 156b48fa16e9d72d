use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::UpdateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

// 只允许修改日期与出勤状态，学生与课程不可变
pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
    data: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_attendance(&principal, id).await?.is_none() {
        return Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance not found"));
    }

    match storage.update_attendance(id, data).await? {
        Some(attendance) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Attendance updated successfully",
        ))),
        None => Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance not found")),
    }
}
