use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(internal_error("查询作业失败", e)),
    }
}
