pub mod attendance;
pub mod users;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::stats::requests::AttendanceStatsQuery;
use crate::storage::Storage;

pub struct StatsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatsService {
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

    pub async fn user_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        users::user_stats(self, request).await
    }

    pub async fn attendance_stats(
        &self,
        request: &HttpRequest,
        query: AttendanceStatsQuery,
    ) -> ActixResult<HttpResponse> {
        attendance::attendance_stats(self, request, query).await
    }
}
