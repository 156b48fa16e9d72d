use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::ApiResponse;
use crate::services::{current_principal, referenced_person};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    class_data.validate()?;
    let storage = service.get_storage(request)?;

    // 班主任必须是教师
    if let Some(supervisor_id) = class_data.supervisor_id {
        referenced_person(
            &storage,
            &principal,
            UserRole::Teacher,
            supervisor_id,
            "supervisorId",
        )
        .await?;
    }

    let class = storage.create_class(class_data).await?;
    info!("Class {} created by {}", class.name, principal.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
}
