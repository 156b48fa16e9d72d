use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_exam(&principal, id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            row,
            "Exam retrieved successfully",
        ))),
        None => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
    }
}
