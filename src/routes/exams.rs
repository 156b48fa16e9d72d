use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::services::ExamService;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

pub async fn get_exam(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, id.into_inner()).await
}

pub async fn create_exam(
    req: HttpRequest,
    data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, data.into_inner()).await
}

pub async fn update_exam(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_exam(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exams")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_exams)
                            .wrap(RequirePermission::new(Resource::Exam, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_exam)
                            .wrap(RequirePermission::new(Resource::Exam, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_exam)
                            .wrap(RequirePermission::new(Resource::Exam, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_exam)
                            .wrap(RequirePermission::new(Resource::Exam, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_exam)
                            .wrap(RequirePermission::new(Resource::Exam, Action::Delete)),
                    ),
            ),
    );
}
