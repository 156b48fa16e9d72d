//! 学生、教师、家长
//!
//! 三类人员共用 users 表，按路由固定的角色区分。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::{self, ObjectCache};
use crate::errors::SchoolError;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreatePersonRequest, UpdatePersonRequest};
use crate::models::{ErrorCode, ListParams};
use crate::storage::Storage;

pub struct PersonService {
    role: UserRole,
    storage: Option<Arc<dyn Storage>>,
}

impl PersonService {
    pub fn new_lazy(role: UserRole) -> Self {
        Self {
            role,
            storage: None,
        }
    }

    pub fn with_storage(role: UserRole, storage: Arc<dyn Storage>) -> Self {
        Self {
            role,
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>, SchoolError> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn role(&self) -> UserRole {
        self.role
    }

    pub(crate) fn label(&self) -> &'static str {
        match self.role {
            UserRole::Admin => "Admin",
            UserRole::Teacher => "Teacher",
            UserRole::Student => "Student",
            UserRole::Parent => "Parent",
        }
    }

    pub(crate) fn not_found(&self) -> HttpResponse {
        super::not_found(ErrorCode::UserNotFound, &format!("{} not found", self.label()))
    }

    pub async fn list_people(
        &self,
        request: &HttpRequest,
        query: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_people(self, request, query).await
    }

    pub async fn get_person(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_person(self, request, id).await
    }

    pub async fn create_person(
        &self,
        request: &HttpRequest,
        data: CreatePersonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_person(self, request, data).await
    }

    pub async fn update_person(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdatePersonRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_person(self, request, id, data).await
    }

    pub async fn delete_person(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_person(self, request, id).await
    }
}

/// 令已缓存的会话重新从数据库加载
pub(crate) async fn evict_sessions(cache: Option<Arc<dyn ObjectCache>>, user_id: i64) {
    if let Some(cache) = cache {
        cache.remove_prefix(&cache::session_prefix(user_id)).await;
    }
}
