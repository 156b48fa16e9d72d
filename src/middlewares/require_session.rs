/*!
 * 会话认证中间件
 *
 * 从 `session-token` Cookie 或 `Authorization: Bearer` 请求头取出会话令牌，
 * 校验签名与过期时间后解析出调用者 [`Principal`]，写入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/classes")
 *     .wrap(RequireSession)
 *     .route("", web::get().to(list_classes))
 * ```
 *
 * 处理函数中通过 [`RequireSession::extract_principal`] 取回调用者。
 * 令牌缺失或无效时直接返回 401，不访问数据库。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;
use crate::cache::{self, CacheResult, ObjectCache};
use crate::models::{
    ErrorCode,
    users::entities::{Principal, UserStatus},
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SessionError {
    /// 401
    Unauthenticated(&'static str),
    /// 500
    Unavailable(&'static str),
}

/// 由令牌解析调用者：先查缓存，未命中再查库并回填
pub(crate) async fn resolve_principal(
    token: &str,
    cache: Option<&dyn ObjectCache>,
    storage: Option<&dyn Storage>,
) -> Result<Principal, SessionError> {
    let claims = JwtUtils::verify_session_token(token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        SessionError::Unauthenticated("Invalid or expired session")
    })?;
    let user_id = claims
        .user_id()
        .ok_or(SessionError::Unauthenticated("Invalid or expired session"))?;

    let key = cache::session_key(user_id, token);
    if let Some(cache) = cache
        && let CacheResult::Found(principal) = cache::get_json::<Principal>(cache, &key).await
    {
        return Ok(principal);
    }

    let storage = storage.ok_or(SessionError::Unavailable("Storage not configured"))?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("读取会话用户失败: {}", e);
            SessionError::Unavailable("Failed to load session user")
        })?
        // 角色无法解析的用户在存储层即被丢弃
        .ok_or(SessionError::Unauthenticated("User not found"))?;

    if user.status != UserStatus::Active {
        return Err(SessionError::Unauthenticated("User is not active"));
    }

    let principal = Principal::from(&user);
    if let Some(cache) = cache {
        cache::insert_json(cache, key, &principal, 0).await;
    }
    Ok(principal)
}

#[derive(Clone)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
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
        Box::pin(async move {
            // 预检请求不带凭据
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            let Some(token) = JwtUtils::extract_token(req.request()) else {
                info!("No session token on request to {}", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            let cache = req
                .app_data::<web::Data<Arc<dyn ObjectCache>>>()
                .map(|data| data.get_ref().clone());
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone());

            match resolve_principal(&token, cache.as_deref(), storage.as_deref()).await {
                Ok(principal) => {
                    debug!(
                        "Session resolved for user {} ({})",
                        principal.id, principal.role
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(SessionError::Unauthenticated(reason)) => {
                    info!("Session rejected for {}: {}", req.path(), reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            reason,
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(SessionError::Unavailable(reason)) => {
                    error!("Session resolution failed for {}: {}", req.path(), reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Internal server error",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireSession {
    /// 从请求扩展中取出调用者，须在 RequireSession 之后使用
    pub fn extract_principal(req: &HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use actix_web::{App, HttpResponse, test};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireSession::extract_principal(&req) {
            Some(p) => HttpResponse::Ok().body(p.username),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[actix_web::test]
    async fn test_missing_token_is_401_without_storage() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(RequireSession)
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/me").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_cached_principal_is_used() {
        let cache = crate::cache::object_cache::moka::MokaCacheWrapper::new();
        let token = JwtUtils::generate_session_token(7, UserRole::Teacher).unwrap();
        let principal = Principal {
            id: 7,
            role: UserRole::Teacher,
            username: "t.cached".to_string(),
        };
        cache::insert_json(&cache, cache::session_key(7, &token), &principal, 60).await;

        let resolved = resolve_principal(&token, Some(&cache), None).await.unwrap();
        assert_eq!(resolved, principal);

        // 缓存被清除后没有存储可查
        cache.remove_prefix(&cache::session_prefix(7)).await;
        assert_eq!(
            resolve_principal(&token, Some(&cache), None).await,
            Err(SessionError::Unavailable("Storage not configured"))
        );
    }
}
