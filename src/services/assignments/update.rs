use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, validate_max_score, validate_rubric};
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    if let Some(title) = req.title.as_mut() {
        *title = title.trim().to_string();
        if title.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "作业标题不能为空",
            )));
        }
    }

    let checked = validate_max_score(req.max_score)
        .and_then(|_| req.rubric.as_ref().map_or(Ok(()), validate_rubric));
    if let Err(msg) = checked {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_assignment(assignment_id, req).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业已更新")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(internal_error("更新作业失败", e)),
    }
}
