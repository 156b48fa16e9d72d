use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn get_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_lesson(&principal, id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            row,
            "Lesson retrieved successfully",
        ))),
        None => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
    }
}
