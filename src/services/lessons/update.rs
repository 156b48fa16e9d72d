use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::lessons::requests::UpdateLessonRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    current_principal, ensure_ordered, not_found, referenced, referenced_person,
};

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    id: i64,
    data: UpdateLessonRequest,
) -> ActixResult<HttpResponse> {
    let principal = current_principal(request)?;
    let storage = service.get_storage(request)?;

    let Some(existing) = storage.get_lesson(&principal, id).await? else {
        return Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found"));
    };
    data.validate()?;

    // 只改一端时与原值比较
    ensure_ordered(
        data.start_time.unwrap_or(existing.start_time),
        data.end_time.unwrap_or(existing.end_time),
        "endTime",
        "End time must be after start time",
    )?;

    if let Some(subject_id) = data.subject_id {
        referenced(
            storage.get_subject(&principal, subject_id).await?,
            "subjectId",
            "Subject",
        )?;
    }
    if let Some(class_id) = data.class_id {
        referenced(storage.get_class(&principal, class_id).await?, "classId", "Class")?;
    }
    if let Some(teacher_id) = data.teacher_id {
        referenced_person(&storage, &principal, UserRole::Teacher, teacher_id, "teacherId").await?;
    }

    match storage.update_lesson(id, data).await? {
        Some(lesson) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson updated successfully",
        ))),
        None => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
    }
}
