/*!
 * 速率限制中间件
 *
 * 固定窗口计数，按客户端 IP 区分。超过限制返回 429 并带 `Retry-After`。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 5次/分钟/IP
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// 全局计数表，键: `前缀:IP`
static RATE_LIMIT_WINDOWS: Lazy<Cache<String, Arc<Mutex<Window>>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(600))
        .max_capacity(100_000)
        .build()
});

#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Allow { remaining: u32 },
    Deny { retry_after: u64 },
}

/// 在窗口内计一次请求
fn hit(window: &mut Window, now: Instant, max_requests: u32, window_len: Duration) -> Decision {
    let elapsed = now.saturating_duration_since(window.started);
    if elapsed >= window_len {
        window.started = now;
        window.count = 0;
    }

    if window.count >= max_requests {
        let left = window_len.saturating_sub(now.saturating_duration_since(window.started));
        return Decision::Deny {
            retry_after: left.as_secs().max(1),
        };
    }

    window.count += 1;
    Decision::Allow {
        remaining: max_requests - window.count,
    }
}

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }
}

/// 客户端 IP：优先取连接信息，其次取代理头
///
/// 直接暴露在不可信网络中时，代理头可以被伪造。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    // 只取第一个（最接近客户端）
    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    use std::net::{IpAddr, SocketAddr};
    ip.parse::<IpAddr>().is_ok() || ip.parse::<SocketAddr>().is_ok()
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window: Duration::from_secs(self.window_secs),
            key_prefix: self.key_prefix.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window: Duration,
    key_prefix: String,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let max_requests = self.max_requests;
        let window_len = self.window;
        let cache_key = format!("{}:{}", self.key_prefix, extract_client_ip(&req));

        Box::pin(async move {
            let window = RATE_LIMIT_WINDOWS
                .get_with(cache_key.clone(), async {
                    Arc::new(Mutex::new(Window {
                        started: Instant::now(),
                        count: 0,
                    }))
                })
                .await;

            let decision = {
                let mut guard = window.lock().unwrap_or_else(|p| p.into_inner());
                hit(&mut guard, Instant::now(), max_requests, window_len)
            };

            match decision {
                Decision::Allow { remaining } => {
                    let mut res = srv.call(req).await?;
                    res.headers_mut().insert(
                        HeaderName::from_static("x-ratelimit-remaining"),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                }
                Decision::Deny { retry_after } => {
                    warn!("Rate limit exceeded for key: {}", cache_key);
                    Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_allows_then_denies() {
        let start = Instant::now();
        let mut window = Window {
            started: start,
            count: 0,
        };
        let len = Duration::from_secs(60);

        for expected in (0..5).rev() {
            assert_eq!(
                hit(&mut window, start, 5, len),
                Decision::Allow {
                    remaining: expected
                }
            );
        }
        assert_eq!(
            hit(&mut window, start + Duration::from_secs(20), 5, len),
            Decision::Deny { retry_after: 40 }
        );

        // 窗口结束后重新计数
        assert_eq!(
            hit(&mut window, start + Duration::from_secs(61), 5, len),
            Decision::Allow { remaining: 4 }
        );
    }

    #[actix_web::test]
    async fn test_login_limit_returns_429() {
        use actix_web::{App, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/login")
                    .wrap(RateLimit::new(2, 60).with_prefix("test-login"))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let mut statuses = Vec::new();
        for _ in 0..3 {
            let req = test::TestRequest::post()
                .uri("/login")
                .peer_addr("10.1.2.3:4000".parse().unwrap())
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }
        assert_eq!(
            statuses,
            vec![StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
        );
    }
}
