use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::results::requests::{CreateResultRequest, UpdateResultRequest};
use crate::services::ResultService;

static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_results(&req, query.into_inner()).await
}

pub async fn get_result(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_result(&req, id.into_inner()).await
}

pub async fn create_result(
    req: HttpRequest,
    data: web::Json<CreateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.create_result(&req, data.into_inner()).await
}

pub async fn update_result(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .update_result(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_result(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete_result(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/results")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_results)
                            .wrap(RequirePermission::new(Resource::Result, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_result)
                            .wrap(RequirePermission::new(Resource::Result, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_result)
                            .wrap(RequirePermission::new(Resource::Result, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_result)
                            .wrap(RequirePermission::new(Resource::Result, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_result)
                            .wrap(RequirePermission::new(Resource::Result, Action::Delete)),
                    ),
            ),
    );
}
