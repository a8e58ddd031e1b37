use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PlagiarismService, detection_not_found};
use crate::models::plagiarism::requests::PlagiarismListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn list_detections(
    service: &PlagiarismService,
    request: &HttpRequest,
    query: PlagiarismListParams,
) -> ActixResult<HttpResponse> {
    if let Some(min) = query.min_similarity
        && !(0.0..=100.0).contains(&min)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "min_similarity 必须在 0 到 100 之间",
        )));
    }

    let storage = service.get_storage(request);
    match storage.list_detections_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(internal_error("查询查重结果失败", e)),
    }
}

pub async fn get_detection(
    service: &PlagiarismService,
    request: &HttpRequest,
    detection_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_detection_by_id(detection_id).await {
        Ok(Some(detection)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(detection, "查询成功")))
        }
        Ok(None) => Ok(detection_not_found()),
        Err(e) => Ok(internal_error("查询查重结果失败", e)),
    }
}
