use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache;
use crate::models::ApiResponse;
use crate::services::cache_from_request;
use crate::utils::jwt::JwtUtils;

/// 处理登出
///
/// 清除该令牌的会话缓存并下发过期 Cookie；令牌无效时同样视为成功。
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::extract_token(request)
        && let Ok(claims) = JwtUtils::verify_session_token(&token)
        && let Some(user_id) = claims.user_id()
        && let Some(cache) = cache_from_request(request)
    {
        cache.remove(&cache::session_key(user_id, &token)).await;
        tracing::debug!("用户 {} 会话缓存已清除", user_id);
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_session_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
