use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_with_assignment};
use crate::evaluation::EvaluationPipeline;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, shared};

pub async fn analyze_video(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (submission, assignment) = match load_with_assignment(&storage, submission_id).await {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    if submission.video_path.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::VideoNotFound,
            "提交没有视频",
        )));
    }

    // 转写或模型失败时仍返回 200，错误写在 error 字段
    let pipeline = shared::<EvaluationPipeline>(request);
    match pipeline.analyze_video(&submission, &assignment).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "视频分析完成"))),
        Err(e) => Ok(internal_error("视频分析失败", e)),
    }
}
