use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PersonService, evict_sessions};
use crate::errors::SchoolError;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::{cache_from_request, current_principal};

pub async fn delete_person(
    service: &PersonService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    if principal.id == id {
        return Err(SchoolError::validation("You cannot delete your own account").into());
    }

    let storage = service.get_storage(request)?;
    if storage
        .get_person(&principal, service.role(), id)
        .await?
        .is_none()
    {
        return Ok(service.not_found());
    }

    match service.role() {
        UserRole::Parent => {
            let children = storage.count_children(id).await?;
            if children > 0 {
                return Err(SchoolError::conflict(format!(
                    "Parent still has {children} student(s) assigned"
                ))
                .into());
            }
        }
        UserRole::Teacher => {
            let lessons = storage.count_teacher_lessons(id).await?;
            if lessons > 0 {
                return Err(SchoolError::conflict(format!(
                    "Teacher still teaches {lessons} lesson(s)"
                ))
                .into());
            }
        }
        UserRole::Student | UserRole::Admin => {}
    }

    if !storage.delete_user(id).await? {
        return Ok(service.not_found());
    }
    evict_sessions(cache_from_request(request), id).await;

    info!("{} {} deleted by {}", service.label(), id, principal.id);
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty(format!(
        "{} deleted successfully",
        service.label()
    ))))
}
