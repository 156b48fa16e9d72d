use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::services::AssignmentService;

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, query.into_inner()).await
}

pub async fn get_assignment(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, id.into_inner()).await
}

pub async fn create_assignment(
    req: HttpRequest,
    data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_assignment(&req, data.into_inner()).await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, id.into_inner(), data.into_inner())
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, id.into_inner()).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_assignments)
                            .wrap(RequirePermission::new(Resource::Assignment, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(RequirePermission::new(Resource::Assignment, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(get_assignment)
                            .wrap(RequirePermission::new(Resource::Assignment, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(RequirePermission::new(Resource::Assignment, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(RequirePermission::new(Resource::Assignment, Action::Delete)),
                    ),
            ),
    );
}
