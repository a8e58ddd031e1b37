pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{CreateStudentRequest, StudentListParams};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        req: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, req).await
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: &str,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }
}
