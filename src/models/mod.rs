pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod exams;
pub mod lessons;
pub mod messages;
pub mod permissions;
pub mod results;
pub mod stats;
pub mod subjects;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, FieldError, FieldErrors, ListParams, MessageBox, PageRequest,
    PaginatedResponse, PaginationInfo,
};
