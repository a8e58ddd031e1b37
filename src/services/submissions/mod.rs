pub mod create;
pub mod delete;
pub mod detail;
pub mod download;
pub mod evaluate;
pub mod list;
pub mod logs;
pub mod video;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::submissions::requests::SubmissionListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub use download::DownloadTarget;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from(request),
        }
    }

    /// 接收 multipart 表单并上传文件
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, payload).await
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }

    pub async fn evaluate_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        evaluate::evaluate_submission(self, request, submission_id).await
    }

    pub async fn analyze_video(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        video::analyze_video(self, request, submission_id).await
    }

    pub async fn download(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        target: DownloadTarget,
    ) -> ActixResult<HttpResponse> {
        download::download(self, request, submission_id, target).await
    }

    pub async fn list_logs(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        logs::list_logs(self, request, submission_id).await
    }
}

fn submission_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubmissionNotFound,
        "提交不存在",
    ))
}

/// 查询未删除的提交，不存在时直接给出响应
pub(crate) async fn load_submission(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<Submission, HttpResponse> {
    match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) if submission.status != SubmissionStatus::Deleted => Ok(submission),
        Ok(_) => Err(submission_not_found()),
        Err(e) => Err(super::internal_error("查询提交失败", e)),
    }
}

/// 查询提交及其所属作业
pub(crate) async fn load_with_assignment(
    storage: &Arc<dyn Storage>,
    submission_id: i64,
) -> Result<(Submission, Assignment), HttpResponse> {
    let submission = load_submission(storage, submission_id).await?;
    match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => Ok((submission, assignment)),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "提交所属的作业不存在",
        ))),
        Err(e) => Err(super::internal_error("查询作业失败", e)),
    }
}
