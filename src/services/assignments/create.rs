use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, validate_max_score, validate_rubric};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    req.title = req.title.trim().to_string();
    if req.title.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "作业标题不能为空",
        )));
    }

    let checked = validate_max_score(req.max_score)
        .and_then(|_| req.rubric.as_ref().map_or(Ok(()), validate_rubric));
    if let Err(msg) = checked {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.get_section_by_id(&req.section_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SectionNotFound,
                "教学班不存在",
            )));
        }
        Err(e) => return Ok(internal_error("查询教学班失败", e)),
    }

    match storage.create_assignment(req).await {
        Ok(assignment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(internal_error("创建作业失败", e)),
    }
}
