pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::ListParams;
use crate::models::exams::requests::{CreateExamRequest, UpdateExamRequest};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        query: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, query).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_exam(self, request, id).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        data: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, data).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, id, data).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, id).await
    }
}
