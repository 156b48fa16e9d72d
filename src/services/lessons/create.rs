use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::LessonService;
use crate::models::ApiResponse;
use crate::models::lessons::requests::CreateLessonRequest;
use crate::models::users::entities::UserRole;
use crate::services::{current_principal, referenced, referenced_person};

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    data: CreateLessonRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    data.validate()?;
    let storage = service.get_storage(request)?;

    referenced(
        storage.get_subject(&principal, data.subject_id).await?,
        "subjectId",
        "Subject",
    )?;
    referenced(
        storage.get_class(&principal, data.class_id).await?,
        "classId",
        "Class",
    )?;
    referenced_person(
        &storage,
        &principal,
        UserRole::Teacher,
        data.teacher_id,
        "teacherId",
    )
    .await?;

    let lesson = storage.create_lesson(data).await?;
    info!("Lesson {} created by {}", lesson.id, principal.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "Lesson created successfully")))
}
