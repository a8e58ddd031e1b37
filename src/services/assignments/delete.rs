use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(internal_error("查询作业失败", e)),
    }

    // 仍有提交的作业不能删除
    match storage.count_assignment_submissions(assignment_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AssignmentHasSubmissions,
                format!("作业下还有 {count} 份提交，无法删除"),
            )));
        }
        Err(e) => return Ok(internal_error("统计提交数量失败", e)),
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(internal_error("删除作业失败", e)),
    }
}
