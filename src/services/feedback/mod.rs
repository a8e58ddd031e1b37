use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::internal_error;
use crate::models::feedback::requests::FeedbackListParams;
use crate::models::feedback::responses::FeedbackListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    /// 按评分或提交查询反馈，两者至少给一个
    pub async fn list_feedback(
        &self,
        request: &HttpRequest,
        query: FeedbackListParams,
    ) -> ActixResult<HttpResponse> {
        if query.grade_id.is_none() && query.submission_id.is_none() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "grade_id 与 submission_id 至少提供一个",
            )));
        }

        let storage = self.get_storage(request);
        match storage.list_feedback(query.grade_id, query.submission_id).await {
            Ok(items) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(FeedbackListResponse { items }, "查询成功"))),
            Err(e) => Ok(internal_error("查询反馈失败", e)),
        }
    }

    pub async fn get_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.get_feedback_by_id(feedback_id).await {
            Ok(Some(feedback)) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "查询成功")))
            }
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeedbackNotFound,
                "反馈不存在",
            ))),
            Err(e) => Ok(internal_error("查询反馈失败", e)),
        }
    }
}
