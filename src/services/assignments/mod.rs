pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::ListParams;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn get_assignment(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, id).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, data).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
        data: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, id, data).await
    }

    pub async fn delete_assignment(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, id).await
    }
}
