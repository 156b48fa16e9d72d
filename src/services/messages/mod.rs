//! 站内消息
//!
//! 所有角色都只能看到自己收发的消息。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod read;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::ListParams;
use crate::models::messages::requests::CreateMessageRequest;
use crate::storage::Storage;

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
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

    pub async fn list_messages(
        &self,
        request: &HttpRequest,
        query: ListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_messages(self, request, query).await
    }

    pub async fn get_message(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_message(self, request, id).await
    }

    pub async fn send_message(
        &self,
        request: &HttpRequest,
        data: CreateMessageRequest,
    ) -> ActixResult<HttpResponse> {
        create::send_message(self, request, data).await
    }

    // 仅收件人可标记已读
    pub async fn mark_read(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        read::mark_read(self, request, id).await
    }

    // 仅发件人可删除
    pub async fn delete_message(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_message(self, request, id).await
    }
}
