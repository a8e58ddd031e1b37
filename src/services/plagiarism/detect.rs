use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PlagiarismService;
use crate::evaluation::EvaluationPipeline;
use crate::models::plagiarism::requests::DetectPlagiarismRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, shared};

pub async fn detect(
    service: &PlagiarismService,
    request: &HttpRequest,
    req: DetectPlagiarismRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(req.assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(internal_error("查询作业失败", e)),
    }

    let only_ids = req.submission_ids.filter(|ids| !ids.is_empty());
    let pipeline = shared::<EvaluationPipeline>(request);
    match pipeline.detect_plagiarism(req.assignment_id, only_ids).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "查重完成"))),
        Err(e) => Ok(internal_error("查重失败", e)),
    }
}
