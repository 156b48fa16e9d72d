use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::subjects::requests::SubjectRequest;
use crate::services::current_principal;

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    data: SubjectRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;
    let storage = service.get_storage(request)?;

    let subject = storage.create_subject(data).await?;
    info!("Subject {} created by {}", subject.name, principal.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        subject,
        "Subject created successfully",
    )))
}
