use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstructorService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_instructor(
    service: &InstructorService,
    request: &HttpRequest,
    instructor_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_instructor_by_id(instructor_id).await {
        Ok(Some(instructor)) => Ok(HttpResponse::Ok().json(ApiResponse::success(instructor, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InstructorNotFound,
            "教师不存在",
        ))),
        Err(e) => Ok(internal_error("查询教师失败", e)),
    }
}
