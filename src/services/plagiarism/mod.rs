pub mod detect;
pub mod list;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::plagiarism::requests::{
    DetectPlagiarismRequest, PlagiarismListParams, ReviewPlagiarismRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct PlagiarismService {
    storage: Option<Arc<dyn Storage>>,
}

impl PlagiarismService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    /// 对作业发起一次查重
    pub async fn detect(
        &self,
        request: &HttpRequest,
        req: DetectPlagiarismRequest,
    ) -> ActixResult<HttpResponse> {
        detect::detect(self, request, req).await
    }

    pub async fn list_detections(
        &self,
        request: &HttpRequest,
        query: PlagiarismListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_detections(self, request, query).await
    }

    pub async fn get_detection(
        &self,
        request: &HttpRequest,
        detection_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_detection(self, request, detection_id).await
    }

    pub async fn review_detection(
        &self,
        request: &HttpRequest,
        detection_id: i64,
        req: ReviewPlagiarismRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_detection(self, request, detection_id, req).await
    }
}

fn detection_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::PlagiarismNotFound,
        "查重结果不存在",
    ))
}
