use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_submission};
use crate::models::ApiResponse;
use crate::models::submissions::responses::SubmissionLogsResponse;
use crate::services::internal_error;

pub async fn list_logs(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_submission(&storage, submission_id).await {
        return Ok(response);
    }

    match storage.list_submission_logs(submission_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionLogsResponse {
                submission_id,
                items,
            },
            "查询成功",
        ))),
        Err(e) => Ok(internal_error("查询评测日志失败", e)),
    }
}
