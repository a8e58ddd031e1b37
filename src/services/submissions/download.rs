use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use std::time::Duration;

use super::{SubmissionService, load_submission};
use crate::blob::BlobStore;
use crate::config::AppConfig;
use crate::models::submissions::responses::DownloadUrlResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::shared;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    Project,
    Video,
}

pub async fn download(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    target: DownloadTarget,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match load_submission(&storage, submission_id).await {
        Ok(submission) => submission,
        Err(response) => return Ok(response),
    };

    let (path, missing) = match target {
        DownloadTarget::Project => (
            submission.project_path,
            (ErrorCode::ProjectNotFound, "提交没有代码压缩包"),
        ),
        DownloadTarget::Video => (
            submission.video_path,
            (ErrorCode::VideoNotFound, "提交没有视频"),
        ),
    };
    let Some(path) = path else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(missing.0, missing.1)));
    };

    let expires_in = AppConfig::get().blob.presign_expiry;
    let blob = shared::<Arc<dyn BlobStore>>(request);
    match blob.presign(&path, Duration::from_secs(expires_in)).await {
        Ok(download_url) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DownloadUrlResponse {
                download_url,
                expires_in,
            },
            "获取下载链接成功",
        ))),
        Err(e) => {
            tracing::error!("Failed to presign {}: {}", path, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::BlobStoreError,
                    format!("生成下载链接失败: {e}"),
                )),
            )
        }
    }
}
