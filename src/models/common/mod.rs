pub mod error_code;
pub mod field_errors;
pub mod list_params;
pub mod pagination;
pub mod response;

pub use error_code::ErrorCode;
pub use field_errors::{FieldError, FieldErrors};
pub use list_params::{ListParams, MessageBox};
pub use pagination::{PageRequest, PaginatedResponse, PaginationInfo};
pub use response::ApiResponse;
