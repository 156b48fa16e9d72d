use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PersonService;
use crate::models::{ApiResponse, ListParams};
use crate::services::current_principal;

pub async fn list_people(
    service: &PersonService,
    request: &HttpRequest,
    query: ListParams,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let page = storage
        .list_people(&principal, service.role(), &query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page,
        format!("{} list retrieved successfully", service.label()),
    )))
}
