use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::subjects::requests::SubjectRequest;
use crate::services::SubjectService;

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, query.into_inner()).await
}

pub async fn get_subject(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(&req, id.into_inner()).await
}

pub async fn create_subject(
    req: HttpRequest,
    data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(&req, data.into_inner()).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_subject(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/subjects")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_subjects)
                            .wrap(RequirePermission::new(Resource::Subject, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_subject)
                            .wrap(RequirePermission::new(Resource::Subject, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_subject)
                            .wrap(RequirePermission::new(Resource::Subject, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_subject)
                            .wrap(RequirePermission::new(Resource::Subject, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_subject)
                            .wrap(RequirePermission::new(Resource::Subject, Action::Delete)),
                    ),
            ),
    );
}
