use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::PersonService;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreatePersonRequest, NewPerson};
use crate::models::{ApiResponse, FieldErrors};
use crate::services::current_principal;
use crate::storage::Storage;
use crate::utils::password::hash_password;

/// 班级必须存在且未满员
pub(super) async fn check_class_seat(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> ActixResult<()> {
    let Some(class) = storage.get_class_by_id(class_id).await? else {
        return Err(FieldErrors::single("classId", "Class does not exist").into());
    };
    let enrolled = storage.count_class_students(class_id).await?;
    if enrolled >= class.capacity.max(0) as u64 {
        return Err(FieldErrors::single("classId", "Class is full").into());
    }
    Ok(())
}

/// 家长 ID 必须指向家长角色的用户
pub(super) async fn check_parent(storage: &Arc<dyn Storage>, parent_id: i64) -> ActixResult<()> {
    match storage.get_user_by_id(parent_id).await? {
        Some(user) if user.role == UserRole::Parent => Ok(()),
        _ => Err(FieldErrors::single("parentId", "Parent does not exist").into()),
    }
}

/// 班级与家长只对学生有意义
pub(super) fn check_student_only_fields(
    role: UserRole,
    class_id: Option<i64>,
    parent_id: Option<i64>,
) -> Result<(), FieldErrors> {
    if role == UserRole::Student {
        return Ok(());
    }
    let mut errors = FieldErrors::new();
    errors.check(class_id.is_none(), "classId", "Only students belong to a class");
    errors.check(parent_id.is_none(), "parentId", "Only students have a parent");
    errors.into_result()
}

pub async fn create_person(
    service: &PersonService,
    request: &HttpRequest,
    data: CreatePersonRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;
    check_student_only_fields(service.role(), data.class_id, data.parent_id)?;

    let storage = service.get_storage(request)?;
    if let Some(class_id) = data.class_id {
        check_class_seat(&storage, class_id).await?;
    }
    if let Some(parent_id) = data.parent_id {
        check_parent(&storage, parent_id).await?;
    }

    let password_hash = hash_password(&data.password)?;
    let person = NewPerson {
        username: data.username,
        password_hash,
        role: service.role(),
        email: data.email,
        first_name: data.first_name.trim().to_string(),
        surname: data.surname.trim().to_string(),
        phone: data.phone,
        address: data.address,
        birthday: data.birthday,
        sex: data.sex,
        class_id: data.class_id,
        parent_id: data.parent_id,
    };

    let user = storage.create_person(person).await?;
    info!(
        "{} {} ({}) created by {}",
        service.label(),
        user.id,
        user.username,
        principal.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        user,
        format!("{} created successfully", service.label()),
    )))
}
