use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::classes::requests::{CreateClassRequest, UpdateClassRequest};
use crate::services::ClassService;

static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn get_class(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, id.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(&req, data.into_inner()).await
}

pub async fn update_class(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/classes")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_classes)
                            .wrap(RequirePermission::new(Resource::Class, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(RequirePermission::new(Resource::Class, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_class)
                            .wrap(RequirePermission::new(Resource::Class, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_class)
                            .wrap(RequirePermission::new(Resource::Class, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(RequirePermission::new(Resource::Class, Action::Delete)),
                    ),
            ),
    );
}
