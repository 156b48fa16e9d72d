//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称与 HTTP 状态码。
//! 5xx 类错误只向客户端返回通用信息，详情写入日志。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status(&self) -> StatusCode {
                match self {
                    $(SchoolError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    CachePluginNotFound("E002", "Cache Plugin Not Found", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E006", "Validation Error", BAD_REQUEST),
    NotFound("E007", "Resource Not Found", NOT_FOUND),
    Serialization("E008", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E009", "Date Parse Error", BAD_REQUEST),
    Authentication("E010", "Authentication Error", UNAUTHORIZED),
    Authorization("E011", "Authorization Error", FORBIDDEN),
    Conflict("E012", "Conflict", CONFLICT),
    Internal("E013", "Internal Error", INTERNAL_SERVER_ERROR),
}

impl SchoolError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为服务端内部错误
    pub fn is_internal(&self) -> bool {
        self.status().is_server_error()
    }

    /// 对应的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => ErrorCode::BadRequest,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolError::Authorization(_) => ErrorCode::Forbidden,
            SchoolError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

impl ResponseError for SchoolError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            // 内部错误不向客户端泄露细节
            tracing::error!("{} {}", self.code(), self.format_simple());
            return HttpResponse::build(self.status()).json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Internal server error",
            ));
        }

        HttpResponse::build(self.status())
            .json(ApiResponse::error_empty(self.error_code(), self.message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolError::database_config("test").code(), "E003");
        assert_eq!(SchoolError::validation("test").code(), "E006");
        assert_eq!(SchoolError::authentication("test").code(), "E010");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            SchoolError::authentication("x").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(SchoolError::authorization("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(SchoolError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(SchoolError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(SchoolError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            SchoolError::database_operation("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = SchoolError::database_operation("near \"SELEC\": syntax error");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_internal());
        assert!(!SchoolError::authorization("no").is_internal());
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
