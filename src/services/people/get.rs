use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PersonService;
use crate::models::ApiResponse;
use crate::services::current_principal;

pub async fn get_person(
    service: &PersonService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_person(&principal, service.role(), id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            user,
            format!("{} retrieved successfully", service.label()),
        ))),
        None => Ok(service.not_found()),
    }
}
