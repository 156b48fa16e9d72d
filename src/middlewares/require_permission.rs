/*!
 * 权限门中间件
 *
 * 必须放在 [`RequireSession`](super::RequireSession) 之后：按请求扩展中的
 * 调用者角色查询静态权限表，不允许时直接返回 403，处理函数与范围查询都不会执行。
 *
 * ```rust,ignore
 * web::resource("")
 *     .route(web::get().to(list_classes))
 *     .route(
 *         web::post()
 *             .to(create_class)
 *             .wrap(RequirePermission::new(Resource::Class, Action::Create)),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::create_error_response;
use crate::models::{
    ErrorCode,
    permissions::{Action, Resource, has_permission},
    users::entities::Principal,
};

#[derive(Clone, Copy)]
pub struct RequirePermission {
    resource: Resource,
    action: Action,
}

impl RequirePermission {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            resource: self.resource,
            action: self.action,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    resource: Resource,
    action: Action,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let resource = self.resource;
        let action = self.action;

        Box::pin(async move {
            let role = req.extensions().get::<Principal>().map(|p| (p.id, p.role));

            match role {
                Some((_, role)) if has_permission(role, resource, action) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some((user_id, role)) => {
                    info!(
                        "Permission denied: user {} ({}) -> {} {}",
                        user_id, role, action, resource
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Permission check without session on {}. Make sure RequireSession is applied first.",
                        req.path()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use actix_web::{App, HttpResponse, test, web};

    // 直接注入调用者，跳过会话解析
    fn app_with_role(
        role: Option<UserRole>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl actix_web::body::MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap_fn(move |req, srv| {
                if let Some(role) = role {
                    req.extensions_mut().insert(Principal {
                        id: 1,
                        role,
                        username: "tester".to_string(),
                    });
                }
                srv.call(req)
            })
            .route(
                "/classes",
                web::post()
                    .to(|| async { HttpResponse::Created().finish() })
                    .wrap(RequirePermission::new(Resource::Class, Action::Create)),
            )
    }

    #[actix_web::test]
    async fn test_gate_by_role() {
        for (role, expected) in [
            (UserRole::Admin, StatusCode::CREATED),
            (UserRole::Teacher, StatusCode::FORBIDDEN),
            (UserRole::Student, StatusCode::FORBIDDEN),
            (UserRole::Parent, StatusCode::FORBIDDEN),
        ] {
            let app = test::init_service(app_with_role(Some(role))).await;
            let resp = test::call_service(
                &app,
                test::TestRequest::post().uri("/classes").to_request(),
            )
            .await;
            assert_eq!(resp.status(), expected, "role {role}");
        }
    }

    #[actix_web::test]
    async fn test_without_principal_is_401() {
        let app = test::init_service(app_with_role(None)).await;
        let resp =
            test::call_service(&app, test::TestRequest::post().uri("/classes").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
