pub mod get;
pub mod list;
pub mod publish;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{GradeListParams, ReviewGradeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    pub async fn get_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        get::get_grade(self, request, grade_id).await
    }

    /// 教师复核
    pub async fn review_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
        req: ReviewGradeRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_grade(self, request, grade_id, req).await
    }

    pub async fn publish_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        publish::publish_grade(self, request, grade_id).await
    }
}

fn grade_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::GradeNotFound, "评分不存在"))
}
