use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission};
use crate::models::ApiResponse;
use crate::models::submissions::entities::SubmissionStatus;
use crate::services::internal_error;

/// 软删除：只把状态改为 deleted，文件保留
pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_submission(&storage, submission_id).await {
        return Ok(response);
    }

    match storage
        .update_submission_status(submission_id, SubmissionStatus::Deleted)
        .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交已删除"))),
        Err(e) => Ok(internal_error("删除提交失败", e)),
    }
}
