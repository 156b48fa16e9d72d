use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::lessons::requests::{CreateLessonRequest, UpdateLessonRequest};
use crate::services::LessonService;

static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn get_lesson(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&req, id.into_inner()).await
}

pub async fn create_lesson(
    req: HttpRequest,
    data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.create_lesson(&req, data.into_inner()).await
}

pub async fn update_lesson(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/lessons")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_lessons)
                            .wrap(RequirePermission::new(Resource::Lesson, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_lesson)
                            .wrap(RequirePermission::new(Resource::Lesson, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_lesson)
                            .wrap(RequirePermission::new(Resource::Lesson, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_lesson)
                            .wrap(RequirePermission::new(Resource::Lesson, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_lesson)
                            .wrap(RequirePermission::new(Resource::Lesson, Action::Delete)),
                    ),
            ),
    );
}
