use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::SchoolError;
use crate::models::users::entities::UserStatus;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Invalid username or password",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 1. 根据用户名或邮箱查找用户
    let identifier = login_request.username.trim();
    let Some(user) = storage.get_user_by_username_or_email(identifier).await? else {
        return Ok(invalid_credentials());
    };

    // 2. 停用账户与错误密码返回同样的信息
    if user.status != UserStatus::Active
        || !verify_password(&login_request.password, &user.password_hash)
    {
        tracing::info!("用户 {} 登录失败", identifier);
        return Ok(invalid_credentials());
    }

    // 3. 签发会话令牌
    let token = JwtUtils::generate_session_token(user.id, user.role)
        .map_err(|e| SchoolError::internal(format!("签发会话令牌失败: {e}")))?;

    // 4. 更新最后登录时间，失败不影响登录
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("更新用户 {} 最后登录时间失败: {}", user.id, e);
    }

    tracing::info!("User {} logged in successfully", user.username);
    let cookie = JwtUtils::create_session_cookie(&token);
    let response = LoginResponse {
        token,
        expires_in: JwtUtils::session_ttl().num_seconds(),
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
