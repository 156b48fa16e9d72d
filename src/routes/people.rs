//! 学生、教师、家长三组路由，处理函数共用，按路由绑定的服务区分角色

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequirePermission, RequireSession};
use crate::models::ListParams;
use crate::models::permissions::{Action, Resource};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreatePersonRequest, UpdatePersonRequest};
use crate::services::PersonService;

static STUDENT_SERVICE: Lazy<PersonService> =
    Lazy::new(|| PersonService::new_lazy(UserRole::Student));
static TEACHER_SERVICE: Lazy<PersonService> =
    Lazy::new(|| PersonService::new_lazy(UserRole::Teacher));
static PARENT_SERVICE: Lazy<PersonService> =
    Lazy::new(|| PersonService::new_lazy(UserRole::Parent));

async fn list_people(
    service: &PersonService,
    req: HttpRequest,
    query: web::Query<ListParams>,
) -> ActixResult<HttpResponse> {
    service.list_people(&req, query.into_inner()).await
}

async fn get_person(
    service: &PersonService,
    req: HttpRequest,
    id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service.get_person(&req, id.into_inner()).await
}

async fn create_person(
    service: &PersonService,
    req: HttpRequest,
    data: web::Json<CreatePersonRequest>,
) -> ActixResult<HttpResponse> {
    service.create_person(&req, data.into_inner()).await
}

async fn update_person(
    service: &PersonService,
    req: HttpRequest,
    id: web::Path<i64>,
    data: web::Json<UpdatePersonRequest>,
) -> ActixResult<HttpResponse> {
    service
        .update_person(&req, id.into_inner(), data.into_inner())
        .await
}

async fn delete_person(
    service: &PersonService,
    req: HttpRequest,
    id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service.delete_person(&req, id.into_inner()).await
}

/// 为一组人员生成路由
macro_rules! people_scope {
    ($path:literal, $service:ident, $resource:expr) => {{
        web::scope($path)
            .wrap(RequireSession)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(|req: HttpRequest, query: web::Query<ListParams>| {
                                list_people(&$service, req, query)
                            })
                            .wrap(RequirePermission::new($resource, Action::Read)),
                    )
                    .route(
                        web::post()
                            .to(|req: HttpRequest, data: web::Json<CreatePersonRequest>| {
                                create_person(&$service, req, data)
                            })
                            .wrap(RequirePermission::new($resource, Action::Create)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(|req: HttpRequest, id: web::Path<i64>| {
                                get_person(&$service, req, id)
                            })
                            .wrap(RequirePermission::new($resource, Action::Read)),
                    )
                    .route(
                        web::put()
                            .to(
                                |req: HttpRequest,
                                 id: web::Path<i64>,
                                 data: web::Json<UpdatePersonRequest>| {
                                    update_person(&$service, req, id, data)
                                },
                            )
                            .wrap(RequirePermission::new($resource, Action::Update)),
                    )
                    .route(
                        web::delete()
                            .to(|req: HttpRequest, id: web::Path<i64>| {
                                delete_person(&$service, req, id)
                            })
                            .wrap(RequirePermission::new($resource, Action::Delete)),
                    ),
            )
    }};
}

// 配置路由
pub fn configure_people_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(people_scope!("/api/students", STUDENT_SERVICE, Resource::Student))
        .service(people_scope!("/api/teachers", TEACHER_SERVICE, Resource::Teacher))
        .service(people_scope!("/api/parents", PARENT_SERVICE, Resource::Parent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_mutation_without_session_is_rejected_before_storage() {
        // 未注册存储，若进入处理函数会得到 500
        let app = test::init_service(App::new().configure(configure_people_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/students")
            .set_json(serde_json::json!({
                "username": "newkid",
                "password": "Blackboard42",
                "firstName": "New",
                "surname": "Kid"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::delete()
            .uri("/api/teachers/3")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
