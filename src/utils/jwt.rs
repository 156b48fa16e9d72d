//! 会话令牌
//!
//! 会话令牌是 HS256 签名的 JWT，通过 `session-token` Cookie 或
//! `Authorization: Bearer` 请求头携带。

use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const BEARER_PREFIX: &str = "Bearer ";

// 会话 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,  // 用户 ID
    pub role: String, // 签发时的角色，仅供参考，以数据库为准
    pub exp: usize,   // 过期时间
    pub iat: usize,   // 签发时间
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> &'static str {
        &AppConfig::get().session.secret
    }

    /// 会话有效期
    pub fn session_ttl() -> chrono::Duration {
        chrono::Duration::minutes(AppConfig::get().session.token_expiry)
    }

    // 生成会话令牌
    pub fn generate_session_token(
        user_id: i64,
        role: UserRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_with_secret(user_id, role, Self::session_ttl(), Self::get_secret())
    }

    pub fn generate_with_secret(
        user_id: i64,
        role: UserRole,
        ttl: chrono::Duration,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (now + ttl).timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    // 验证会话令牌（签名与过期时间）
    pub fn verify_session_token(token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(token, Self::get_secret())
    }

    pub fn verify_with_secret(
        token: &str,
        secret: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        decode::<SessionClaims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
    }

    /// 从 Cookie 或 Bearer 请求头中取出令牌，Cookie 优先
    pub fn extract_token(req: &HttpRequest) -> Option<String> {
        let cookie_name = &AppConfig::get().session.cookie_name;
        if let Some(cookie) = req.cookie(cookie_name)
            && !cookie.value().is_empty()
        {
            return Some(cookie.value().to_string());
        }

        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::minutes(
                config.session.token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_token_carries_user_and_role() {
        let token =
            JwtUtils::generate_with_secret(42, UserRole::Teacher, chrono::Duration::hours(1), "k1")
                .unwrap();
        let claims = JwtUtils::verify_with_secret(&token, "k1").unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "teacher");
    }

    #[test]
    fn test_token_signed_with_other_key_is_rejected() {
        let token =
            JwtUtils::generate_with_secret(1, UserRole::Admin, chrono::Duration::hours(1), "k1")
                .unwrap();
        assert!(JwtUtils::verify_with_secret(&token, "k2").is_err());
        assert!(JwtUtils::verify_with_secret("not.a.token", "k1").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token =
            JwtUtils::generate_with_secret(1, UserRole::Admin, chrono::Duration::hours(-2), "k1")
                .unwrap();
        assert!(JwtUtils::verify_with_secret(&token, "k1").is_err());
    }

    #[test]
    fn test_extract_token_from_cookie_or_header() {
        let cookie_name = AppConfig::get().session.cookie_name.clone();

        let req = TestRequest::default()
            .cookie(Cookie::new(cookie_name, "from-cookie"))
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_token(&req).as_deref(), Some("from-cookie"));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer from-header"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_token(&req).as_deref(), Some("from-header"));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_token(&req), None);
    }
}
