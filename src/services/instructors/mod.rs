pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::instructors::requests::{CreateInstructorRequest, InstructorListParams};
use crate::storage::Storage;

pub struct InstructorService {
    storage: Option<Arc<dyn Storage>>,
}

impl InstructorService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn create_instructor(
        &self,
        request: &HttpRequest,
        req: CreateInstructorRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_instructor(self, request, req).await
    }

    pub async fn list_instructors(
        &self,
        request: &HttpRequest,
        query: InstructorListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_instructors(self, request, query).await
    }

    pub async fn get_instructor(
        &self,
        request: &HttpRequest,
        instructor_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_instructor(self, request, instructor_id).await
    }
}
