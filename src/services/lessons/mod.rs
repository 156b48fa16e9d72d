pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::ListParams;
use crate::models::lessons::requests::{CreateLessonRequest, UpdateLessonRequest};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>, SchoolError> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        query: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, query).await
    }

    pub async fn get_lesson(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_lesson(self, request, id).await
    }

    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        data: CreateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, request, data).await
    }

    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, id, data).await
    }

    pub async fn delete_lesson(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, request, id).await
    }
}
