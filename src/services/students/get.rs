use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(student, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => Ok(internal_error("查询学生失败", e)),
    }
}
