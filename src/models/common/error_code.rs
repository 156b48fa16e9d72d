/// 业务错误码，写入响应信封的 `code` 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,

    // 认证
    Unauthorized = 2000,
    AuthFailed = 2001,

    // 授权
    Forbidden = 3000,

    // 资源
    NotFound = 4000,
    UserNotFound = 4001,
    ClassNotFound = 4002,
    SubjectNotFound = 4003,
    LessonNotFound = 4004,
    ExamNotFound = 4005,
    AssignmentNotFound = 4006,
    ResultNotFound = 4007,
    AttendanceNotFound = 4008,
    MessageNotFound = 4009,
    Conflict = 4090,

    // 限流
    RateLimitExceeded = 4290,

    InternalServerError = 5000,
}
