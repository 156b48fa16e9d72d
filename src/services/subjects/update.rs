use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::requests::SubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_principal, not_found};

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    id: i64,
    data: SubjectRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_subject(&principal, id).await?.is_none() {
        return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found"));
    }
    data.validate()?;

    match storage.update_subject(id, data).await? {
        Some(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        None => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
    }
}
