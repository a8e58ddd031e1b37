use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PlagiarismService, detection_not_found};
use crate::models::plagiarism::requests::ReviewPlagiarismRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn review_detection(
    service: &PlagiarismService,
    request: &HttpRequest,
    detection_id: i64,
    req: ReviewPlagiarismRequest,
) -> ActixResult<HttpResponse> {
    // 复核只能给出最终结论
    if !req.status.is_reviewed() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidPlagiarismStatus,
            format!("复核状态只能是 confirmed 或 dismissed，收到 {}", req.status),
        )));
    }

    let storage = service.get_storage(request);
    match storage
        .review_detection(detection_id, req.status, req.reviewed_by)
        .await
    {
        Ok(Some(detection)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(detection, "复核成功")))
        }
        Ok(None) => Ok(detection_not_found()),
        Err(e) => Ok(internal_error("复核查重结果失败", e)),
    }
}
