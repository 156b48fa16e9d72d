use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ListParams};
use crate::services::current_principal;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: ListParams,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let page = storage.list_assignments(&principal, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page,
        "Assignment list retrieved successfully",
    )))
}
