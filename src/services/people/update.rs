use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::create::{check_class_seat, check_parent, check_student_only_fields};
use super::{PersonService, evict_sessions};
use crate::models::ApiResponse;
use crate::models::users::entities::UserStatus;
use crate::models::users::requests::{PersonChanges, UpdatePersonRequest};
use crate::services::{cache_from_request, current_principal};
use crate::utils::password::hash_password;

pub async fn update_person(
    service: &PersonService,
    request: &HttpRequest,
    id: i64,
    data: UpdatePersonRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(existing) = storage.get_person(&principal, service.role(), id).await? else {
        return Ok(service.not_found());
    };
    data.validate()?;
    check_student_only_fields(
        service.role(),
        data.class_id.flatten(),
        data.parent_id.flatten(),
    )?;

    // 转班时检查新班级名额
    if let Some(Some(class_id)) = data.class_id
        && existing.class_id != Some(class_id)
    {
        check_class_seat(&storage, class_id).await?;
    }
    if let Some(Some(parent_id)) = data.parent_id {
        check_parent(&storage, parent_id).await?;
    }

    let password_hash = match &data.password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };
    let status = data.active.map(|active| {
        if active {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        }
    });
    let session_changed = password_hash.is_some() || status == Some(UserStatus::Inactive);

    let changes = PersonChanges {
        password_hash,
        email: data.email,
        first_name: data.first_name.map(|s| s.trim().to_string()),
        surname: data.surname.map(|s| s.trim().to_string()),
        phone: data.phone,
        address: data.address,
        birthday: data.birthday,
        sex: data.sex,
        class_id: data.class_id,
        parent_id: data.parent_id,
        status,
    };

    match storage.update_person(id, changes).await? {
        Some(user) => {
            if session_changed {
                evict_sessions(cache_from_request(request), id).await;
            }
            info!("{} {} updated by {}", service.label(), id, principal.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                user,
                format!("{} updated successfully", service.label()),
            )))
        }
        None => Ok(service.not_found()),
    }
}
