use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{current_principal, not_found, referenced_person};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    if storage.get_class(&principal, class_id).await?.is_none() {
        return Ok(not_found(ErrorCode::ClassNotFound, "Class not found"));
    }
    update_data.validate()?;

    if let Some(supervisor_id) = update_data.supervisor_id {
        referenced_person(
            &storage,
            &principal,
            UserRole::Teacher,
            supervisor_id,
            "supervisorId",
        )
        .await?;
    }

    // 容量不能低于已在读人数
    if let Some(capacity) = update_data.capacity {
        let enrolled = storage.count_class_students(class_id).await?;
        if (capacity as u64) < enrolled {
            return Err(FieldErrors::single(
                "capacity",
                format!("Capacity cannot be lower than the {enrolled} enrolled students"),
            )
            .into());
        }
    }

    match storage.update_class(class_id, update_data).await? {
        Some(class) => {
            info!("Class {} updated by {}", class.id, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        None => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
    }
}
