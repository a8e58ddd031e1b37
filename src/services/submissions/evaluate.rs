use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_with_assignment};
use crate::evaluation::EvaluationPipeline;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::shared;

/// 同步执行代码评测，模型调用完成后才返回
pub async fn evaluate_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (submission, assignment) = match load_with_assignment(&storage, submission_id).await {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    if submission.project_path.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "提交没有代码压缩包",
        )));
    }

    let pipeline = shared::<EvaluationPipeline>(request);
    match pipeline.evaluate(&submission, &assignment).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "评测完成"))),
        Err(e) => {
            tracing::error!("Evaluation of submission {} failed: {}", submission_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationFailed,
                    format!("评测失败: {e}"),
                )),
            )
        }
    }
}
