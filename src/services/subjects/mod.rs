pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::ListParams;
use crate::models::subjects::requests::SubjectRequest;
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
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

    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, query).await
    }

    pub async fn get_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, id).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        data: SubjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, data).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        id: i64,
        data: SubjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, request, id, data).await
    }

    // 仍有课程引用的科目不能删除
    pub async fn delete_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, request, id).await
    }
}
